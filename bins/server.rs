use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::sync::oneshot;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // .env first so RUST_LOG, DATABASE_URL and friends are visible to the config loader
    dotenv().ok();

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "server", event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.server.log_format);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "server", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "realty crm starting"
    );

    rt.block_on(async move {
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut server_task = tokio::spawn(server::run(cfg, async move {
            let _ = stop_rx.await;
        }));

        tokio::select! {
            res = &mut server_task => report(res, service_id, pid),
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, draining connections");
                let _ = stop_tx.send(());
                // serve returns once in-flight requests finish
                report(server_task.await, service_id, pid)
            }
        }
    })
}

fn report(
    res: Result<Result<(), server::errors::StartupError>, tokio::task::JoinError>,
    service_id: Uuid,
    pid: u32,
) -> ExitCode {
    match res {
        Ok(Ok(())) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(service = "server", event = "task_join_error", error = %e, "server task join error");
            ExitCode::FAILURE
        }
    }
}
