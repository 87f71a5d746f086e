use std::process::ExitCode;

use browser::{NativeDialogs, ShellApp, ShellConfig};
use platform::{AppContext, EngineHooks, WindowOptions};
use webview::WebViewSurface;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ShellConfig::from_env();
    let options = WindowOptions {
        title: config.app_name.clone(),
        width: config.window_width,
        height: config.window_height,
    };

    let hooks = EngineHooks {
        init: webview::init_platform,
        pump: webview::pump_platform_events,
    };

    let result = platform::run(options, hooks, move |cx: AppContext<'_>| {
        let surface = WebViewSurface::new(cx.window, &config.start_url, cx.evt_tx, cx.repaint)?;
        let shell = ShellApp::new(config, Box::new(surface), Box::new(NativeDialogs));
        Ok(Box::new(shell) as Box<dyn platform::UiApp>)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
