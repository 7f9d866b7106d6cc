use credit_ledger::{app, config::Settings, telemetry};

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            // no subscriber yet
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    telemetry::init_tracing(&settings.log_level);

    if let Err(err) = app::run(std::env::args(), &settings) {
        tracing::error!(error = %err, "credit-ledger failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
