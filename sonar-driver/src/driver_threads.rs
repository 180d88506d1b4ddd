use crate::error::SonarError;
use crate::parser::parse_reading;
use crate::source::LineSource;
use crate::sweep::SweepBuffer;
use crossbeam_channel::{Receiver, Sender};
use log::{error, info, warn};
use std::any::Any;
use std::thread::JoinHandle;

/// Handle on a running acquisition session.
///
/// Dropping it stops the session and waits for the serial source to be released.
pub struct AcquisitionThread {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) thread: Option<JoinHandle<Result<(), SonarError>>>,
}

impl AcquisitionThread {
    /// Stops acquisition and returns how the session ended.
    ///
    /// A session cut short by the source reports
    /// [`SonarError::SourceDisconnected`] here.
    pub fn stop(mut self) -> Result<(), SonarError> {
        join(&mut self)
    }

    /// Whether the acquisition loop has already exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }
}

pub(crate) fn acquire<S: LineSource>(
    source: &mut S,
    buffer: &mut SweepBuffer,
    terminator_rx: Receiver<bool>,
) -> Result<(), SonarError> {
    loop {
        if do_terminate(&terminator_rx) {
            info!("Acquisition stopped.");
            return Ok(());
        }

        let line = match source.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(e) => {
                error!("{e}");
                return Err(e);
            }
        };

        match parse_reading(&line) {
            Ok(reading) => {
                buffer.ingest(reading);
            }
            Err(e) => warn!("{e}"),
        }
    }
}

pub(crate) fn spawn<S>(
    mut source: S,
    mut buffer: SweepBuffer,
    terminator_rx: Receiver<bool>,
) -> JoinHandle<Result<(), SonarError>>
where
    S: LineSource + Send + 'static,
{
    std::thread::spawn(move || {
        // the source is dropped, closing the port, as soon as the loop exits
        acquire(&mut source, &mut buffer, terminator_rx)
    })
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Signals the acquisition thread to stop and joins it.
/// This function is automatically called when `AcquisitionThread` is dropped.
pub fn join(acquisition: &mut AcquisitionThread) -> Result<(), SonarError> {
    // the receiver is gone once the loop has exited on its own
    let _ = acquisition.terminator_tx.send(true);

    match acquisition.thread.take() {
        Some(thread) => thread.join().unwrap_or_else(|payload| {
            let reason = panic_message(payload.as_ref());
            error!("Acquisition thread panicked: {reason}");
            Err(SonarError::AcquisitionPanicked(reason))
        }),
        None => Ok(()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown cause".to_string()
    }
}

impl Drop for AcquisitionThread {
    fn drop(&mut self) {
        if let Err(e) = join(self) {
            error!("Acquisition ended with an error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use sonar_data::Reading;
    use std::collections::VecDeque;

    struct ScriptedSource {
        lines: VecDeque<Result<Option<String>, SonarError>>,
    }

    impl ScriptedSource {
        fn from_lines(lines: &[&str]) -> ScriptedSource {
            ScriptedSource {
                lines: lines.iter().map(|l| Ok(Some(l.to_string()))).collect(),
            }
        }
    }

    impl LineSource for ScriptedSource {
        fn next_line(&mut self) -> Result<Option<String>, SonarError> {
            self.lines.pop_front().unwrap_or_else(|| {
                Err(SonarError::SourceDisconnected("script exhausted".to_string()))
            })
        }
    }

    #[test]
    fn test_acquire_skips_malformed_lines() {
        let mut source =
            ScriptedSource::from_lines(&["0,10", "abc,10", "90,20", "12", "180,-1"]);
        let mut buffer = SweepBuffer::new();
        let view = buffer.view();
        let (_terminator_tx, terminator_rx) = bounded(1);

        let result = acquire(&mut source, &mut buffer, terminator_rx);
        assert!(matches!(result, Err(SonarError::SourceDisconnected(_))));
        assert_eq!(
            view.snapshot(),
            vec![
                Reading::new(0., 10.),
                Reading::new(90., 20.),
                Reading::new(180., 0.)
            ]
        );
    }

    #[test]
    fn test_acquire_disconnect_keeps_sweep() {
        let mut source =
            ScriptedSource::from_lines(&["0,10", "90,20", "180,-1", "270,5", "360,8", "10,3"]);
        let mut buffer = SweepBuffer::new();
        let view = buffer.view();
        let (_terminator_tx, terminator_rx) = bounded(1);

        assert!(acquire(&mut source, &mut buffer, terminator_rx).is_err());
        assert_eq!(
            view.snapshot(),
            vec![Reading::new(360., 8.), Reading::new(10., 3.)]
        );
    }

    #[test]
    fn test_acquire_timeouts_are_polled() {
        let mut source = ScriptedSource {
            lines: VecDeque::from(vec![Ok(None), Ok(Some("45,3".to_string())), Ok(None)]),
        };
        let mut buffer = SweepBuffer::new();
        let (_terminator_tx, terminator_rx) = bounded(1);

        assert!(acquire(&mut source, &mut buffer, terminator_rx).is_err());
        assert_eq!(buffer.snapshot(), vec![Reading::new(45., 3.)]);
    }

    #[test]
    fn test_acquire_terminates() {
        let mut source = ScriptedSource::from_lines(&["0,10"]);
        let mut buffer = SweepBuffer::new();
        let (terminator_tx, terminator_rx) = bounded(1);
        terminator_tx.send(true).unwrap();

        assert!(acquire(&mut source, &mut buffer, terminator_rx).is_ok());
        // terminated before reading anything
        assert!(buffer.snapshot().is_empty());
    }
}
