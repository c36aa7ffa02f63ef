//! From a match state to a sampled action.
//!
//! An [`Encoder`] names what the acting seat can see as an [`InfosetKey`];
//! the [`StrategyStore`] maps that key to a [`StrategyEntry`]; [`decide`]
//! samples one action from it with a [`Draw`].
pub mod encoder;
pub use encoder::*;

pub mod entry;
pub use entry::*;

pub mod infoset;
pub use infoset::*;

pub mod sampler;
pub use sampler::*;

pub mod store;
pub use store::*;
