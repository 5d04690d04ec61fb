//! Browser-side generation: the simulated generator on real timers.
//!
//! The remote copy-generation service has no defined request contract
//! yet. Until it does, the app uses [`SimulatedGenerator`] with a
//! browser `setTimeout` delay, wrapped in a [`WithDeadline`] so a
//! future real call cannot leave the page stuck in the processing state.

use copyforge_session::{GenerationConfig, Generator, SimulatedGenerator, WithDeadline};
use gloo_timers::future::TimeoutFuture;

use crate::Payload;

/// Build the generator the app uses.
#[must_use]
pub fn browser_generator(config: GenerationConfig) -> impl Generator<Payload> {
    let delay = config.simulated_delay_ms;
    let timeout = config.timeout_ms;
    WithDeadline::new(
        SimulatedGenerator::new(move || TimeoutFuture::new(delay)),
        move || TimeoutFuture::new(timeout),
    )
}
