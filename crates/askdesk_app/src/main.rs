use askdesk_app::platform::config::AppConfig;
use askdesk_app::platform::run_app;

fn main() -> anyhow::Result<()> {
    run_app(AppConfig::from_env())
}
