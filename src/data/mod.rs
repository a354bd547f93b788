//! Series loading, split membership, and window extraction

mod frame;
mod window;

pub use frame::{SeriesFrame, SeriesSplit};
pub use window::{Window, WindowDataset};
