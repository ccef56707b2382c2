pub mod cifar;
pub mod pair_source;
pub mod synthetic;

pub use pair_source::CorruptedPairSource;
