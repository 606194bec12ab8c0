//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by writing controller events to the logger
//! (UART / USB-CDC in production). Reporting is observability only; the
//! control loop is correct with a silent sink.

use log::info;

use crate::ports::{ControllerEvent, ReportSink};

/// Adapter that logs every [`ControllerEvent`] to the serial console.
pub struct LogReportSink;

impl LogReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for LogReportSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::LevelSampled { level } => {
                info!("LEVEL | daily sample | level={}", level);
            }
            ControllerEvent::MotorOn { level } => {
                info!("MOTOR | ON  | level={}", level);
            }
            ControllerEvent::MotorOff { level } => {
                info!("MOTOR | OFF | level={}", level);
            }
        }
    }
}
