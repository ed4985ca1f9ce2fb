// Dataset loading and partitioning: the loader stage and the split half of
// the preparer stage.

pub mod dataset;
pub mod split;
pub mod table;

pub use dataset::LabeledDataset;
pub use split::{stratified_split, SplitIndices};
pub use table::{load, Table};
