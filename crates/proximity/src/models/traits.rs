//! Traits shared by everything that has a position on the map.

use crate::models::types::GeoPoint;

/// Something with a single geographic location (a stop, a bus fix, a raw point)
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

impl<T: Located + ?Sized> Located for std::sync::Arc<T> {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}
