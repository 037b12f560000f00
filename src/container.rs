/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Dependency injection container for the QC collection services

use crate::adapters::JsonReportRepository;
#[cfg(windows)]
use crate::adapters::WmiInventorySource;
#[cfg(not(windows))]
use crate::adapters::PortableInventorySource;
use crate::domain::{ReportAssemblyService, ReportConfig};
use crate::ports::{InventorySource, QcReportingService, ReportRepository};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the dependency injection container
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// Run configuration handed to the binary's output/pause flow
    pub report: ReportConfig,
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Override the report output directory
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.config.report.output_dir = Some(dir);
        self
    }

    /// Control the operator keypress wait before exit
    pub fn pause_on_exit(mut self, pause: bool) -> Self {
        self.config.report.pause_on_exit = pause;
        self
    }

    /// Enable verbose logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.report.verbose = verbose;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
}

impl ServiceContainer {
    /// Create a new service container with configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    /// Create the platform-specific inventory source
    pub fn create_inventory_source(&self) -> Arc<dyn InventorySource> {
        #[cfg(windows)]
        {
            Arc::new(WmiInventorySource::new())
        }
        #[cfg(not(windows))]
        {
            Arc::new(PortableInventorySource::new())
        }
    }

    /// Create the report file repository
    pub fn create_report_repository(&self) -> Arc<dyn ReportRepository> {
        Arc::new(JsonReportRepository::new())
    }

    /// Create the complete report assembly service
    pub fn create_reporting_service(&self) -> Arc<dyn QcReportingService> {
        Arc::new(ReportAssemblyService::new(self.create_inventory_source()))
    }

    /// Run configuration carried by this container
    pub fn report_config(&self) -> &ReportConfig {
        &self.config.report
    }

    /// Get inventory backend name for logging
    pub fn backend_name(&self) -> &'static str {
        if cfg!(windows) {
            "Windows management interface"
        } else {
            "portable probe"
        }
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new(ContainerConfig::default())
    }
}
