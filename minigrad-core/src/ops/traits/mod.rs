pub mod numeric;

pub use numeric::MinigradNumeric;
