//! Test doubles shared by the unit tests

extern crate std;

use std::vec::Vec;

use crate::matrix::{Crosspoint, SwitchAddress};

/// Records every `set` call in issue order.
#[derive(Debug, Default)]
pub struct RecordingMatrix {
    pub calls: Vec<(bool, SwitchAddress)>,
}

impl RecordingMatrix {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn closed(&self) -> Vec<SwitchAddress> {
        self.calls.iter().filter(|(on, _)| *on).map(|&(_, a)| a).collect()
    }

    pub fn opened(&self) -> Vec<SwitchAddress> {
        self.calls.iter().filter(|(on, _)| !*on).map(|&(_, a)| a).collect()
    }
}

impl Crosspoint for RecordingMatrix {
    type Error = core::convert::Infallible;

    fn set(&mut self, on: bool, address: SwitchAddress) -> Result<(), Self::Error> {
        self.calls.push((on, address));
        Ok(())
    }
}
