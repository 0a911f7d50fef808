// Interactive controls
//
// Keys: `q` quits, `1`..`5` select the instruction style. A reader thread
// forwards stdin lines over an mpsc channel; the frame loop drains it without
// blocking once per frame.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::styles::InstructionStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SelectStyle(InstructionStyle),
    Quit,
}

impl Control {
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(Control::Quit),
            other => InstructionStyle::from_key(other).map(Control::SelectStyle),
        }
    }

    /// Every recognised key in `line`, in order
    pub fn parse_line(line: &str) -> Vec<Self> {
        line.chars().filter_map(Self::from_key).collect()
    }
}

pub trait ControlInput {
    /// Controls received since the last poll; never blocks
    fn poll(&mut self) -> Vec<Control>;
}

/// Non-interactive runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoControls;

impl ControlInput for NoControls {
    fn poll(&mut self) -> Vec<Control> {
        Vec::new()
    }
}

pub struct StdinControls {
    rx: Receiver<Control>,
    disconnected: bool,
}

impl StdinControls {
    /// Spawn the stdin reader thread
    pub fn spawn() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-controls".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    for control in Control::parse_line(&line) {
                        if tx.send(control).is_err() {
                            return;
                        }
                    }
                }
            })?;
        Ok(Self {
            rx,
            disconnected: false,
        })
    }
}

impl ControlInput for StdinControls {
    fn poll(&mut self) -> Vec<Control> {
        let mut controls = Vec::new();
        if self.disconnected {
            return controls;
        }
        loop {
            match self.rx.try_recv() {
                Ok(control) => controls.push(control),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("[Controls] stdin closed");
                    self.disconnected = true;
                    break;
                }
            }
        }
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_controls() {
        assert_eq!(Control::from_key('q'), Some(Control::Quit));
        assert_eq!(Control::from_key('Q'), Some(Control::Quit));
        assert_eq!(
            Control::from_key('3'),
            Some(Control::SelectStyle(InstructionStyle::Bhojpuri))
        );
        assert_eq!(Control::from_key('6'), None);
        assert_eq!(Control::from_key('x'), None);
    }

    #[test]
    fn test_parse_line_keeps_order() {
        assert_eq!(
            Control::parse_line("2 q"),
            vec![
                Control::SelectStyle(InstructionStyle::Bollywood),
                Control::Quit
            ]
        );
    }

    #[test]
    fn test_no_controls_is_silent() {
        assert!(NoControls.poll().is_empty());
    }
}
