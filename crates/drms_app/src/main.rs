use std::process::ExitCode;

fn main() -> ExitCode {
    match drms_app::App::new().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
