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

use log::{debug, warn};
use qc_collector::domain::{ReportConfig, ReportConfigFile};
use qc_collector::{ContainerConfig, ServiceContainer};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "qc_collector")]
struct Opt {
    /// Directory the report file is written to (defaults to the directory
    /// containing this executable)
    #[structopt(long, parse(from_os_str))]
    output_dir: Option<PathBuf>,

    /// Optional TOML config file with run overrides
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Skip the operator keypress wait before exit
    #[structopt(long)]
    no_pause: bool,

    /// Verbose logging
    #[structopt(long, short)]
    verbose: bool,
}

/// Resolve the run configuration: defaults, then config file, then flags.
fn resolve_config(opt: &Opt) -> ReportConfig {
    let mut config = ReportConfig::default();

    if let Some(path) = &opt.config {
        match ReportConfigFile::load(path) {
            Ok(file) => config = config.overlay(&file),
            Err(e) => warn!("ignoring config file: {}", e),
        }
    }

    if let Some(dir) = &opt.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if opt.no_pause {
        config.pause_on_exit = false;
    }
    if opt.verbose {
        config.verbose = true;
    }
    config
}

/// Directory containing the running executable, falling back to the
/// current directory when it cannot be determined.
fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn wait_for_keypress() {
    print!("Press Enter to exit...");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

#[tokio::main]
async fn main() {
    let opt = Opt::from_args();
    let config = resolve_config(&opt);

    let mut log_builder = env_logger::Builder::from_default_env();
    if config.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    println!("--------------------------------");
    println!("   QC AUDITOR PRO - COLLECTOR   ");
    println!("   Scanning Hardware...         ");
    println!("--------------------------------");

    let container = ServiceContainer::new(ContainerConfig {
        report: config.clone(),
    });
    debug!("collecting via {}", container.backend_name());

    let service = container.create_reporting_service();
    let report = service.assemble_report().await;

    let output_dir = config.output_dir.clone().unwrap_or_else(executable_dir);
    let file_name = report.file_name();
    let file_path = output_dir.join(&file_name);

    let repository = container.create_report_repository();
    match repository.save_json(&report, &file_path).await {
        Ok(()) => println!("[SUCCESS] Report saved: {}", file_name),
        // A failed write must not abort the run; the operator still gets
        // the console summary and a normal exit.
        Err(e) => println!("[ERROR] Save failed: {}", e),
    }

    println!();
    if let Some(error) = &report.error {
        println!("[WARNING] Partial scan: {}", error);
    }
    println!("Summary for {}:", report.identity.model);
    println!("CPU: {}", report.specs.cpu.name);
    println!("RAM: {}GB", report.specs.ram.total_gb);
    if report.battery.present {
        println!("Battery Wear: {}%", report.battery.wear_level_percent);
    }

    let issues = &report.system_check.driver_issues;
    if issues.is_empty() {
        println!("[OK] All Drivers Healthy");
    } else {
        println!("[WARNING] {} Driver Errors found!", issues.len());
    }

    println!();
    println!("--------------------------------");
    if config.pause_on_exit {
        wait_for_keypress();
    }
    // Exit status does not distinguish outcomes; the report's error field
    // and console text do.
}
