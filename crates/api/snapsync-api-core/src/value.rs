//! Time-sampled channel primitives.

use serde::{Deserialize, Serialize};

/// One time/value pair within a channel.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sample<T> {
    /// Time in seconds.
    pub time: f32,
    pub value: T,
}

impl<T> Sample<T> {
    pub fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// An ordered sequence of samples for one animatable property.
/// Sample times are strictly increasing; an empty channel means "not animated".
pub type Channel<T> = Vec<Sample<T>>;
