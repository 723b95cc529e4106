pub mod package;

pub use package::{Capacity, CatalogError, Location, NewPackage, Package, PackagePatch};
