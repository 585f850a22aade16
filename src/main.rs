use std::process::ExitCode;

use glint::Settings;

fn main() -> ExitCode {
    match glint::run(Settings::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 창이나 GPU를 얻지 못하면 더 할 수 있는 게 없음
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
