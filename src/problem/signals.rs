//! Process-level wiring: panics and unix signals
//!
//! Both hooks are explicit opt-in calls made once at process start;
//! nothing here installs itself.

use super::handler::{ErrorHandler, RaisedError};
use std::sync::Arc;

/// Route panics into the handler as catastrophic conditions.
///
/// The hook replaces the default panic printer; the payload and
/// location end up in the problem report instead.
pub fn install_panic_hook(handler: Arc<ErrorHandler>) {
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let message = match info.location() {
            Some(location) => format!("panic at {}: {}", location, payload),
            None => format!("panic: {}", payload),
        };
        handler.handle_fatal(RaisedError::Opaque(message));
    }));
}

/// Route SIGINT, SIGTERM and SIGUSR2 into graceful shutdown.
///
/// Spawns a listener thread that runs for the rest of the process
/// lifetime; the returned handle is not joinable in practice.
#[cfg(unix)]
pub fn install_signal_handlers(
    handler: Arc<ErrorHandler>,
) -> crate::core::error::Result<std::thread::JoinHandle<()>> {
    use super::handler::ShutdownReason;
    use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR2};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGUSR2])?;
    let handle = std::thread::Builder::new()
        .name("signal-listener".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                let reason = match signal {
                    SIGINT => ShutdownReason::Interrupt,
                    SIGTERM => ShutdownReason::Terminate,
                    SIGUSR2 => ShutdownReason::UserDefined,
                    _ => continue,
                };
                handler.shutdown(reason);
            }
        })?;
    Ok(handle)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::config::Environment;
    use crate::core::logger::Logger;
    use parking_lot::Mutex;
    use std::time::Duration;

    #[test]
    fn test_sigusr2_routes_to_graceful_shutdown() {
        let exits: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&exits);

        let logger = Logger::builder().transports(vec![]).build().unwrap();
        let handler = Arc::new(
            ErrorHandler::new(Arc::new(logger), Environment::Production)
                .with_terminator(move |code| recorded.lock().push(code)),
        );

        install_signal_handlers(Arc::clone(&handler)).unwrap();
        signal_hook::low_level::raise(signal_hook::consts::SIGUSR2).unwrap();

        // signal delivery goes through the listener thread
        for _ in 0..100 {
            if handler.is_shutting_down() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(exits.lock().as_slice(), &[0]);
    }
}
