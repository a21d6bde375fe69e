//! Various utility types and functions.

pub use dims::Dims;

pub mod dims {
    /// Width and height of a rectangular area, such as a viewport.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Dims<T = u32>(pub T, pub T);

    impl<T: Copy> Dims<T> {
        pub fn width(&self) -> T {
            self.0
        }
        pub fn height(&self) -> T {
            self.1
        }
    }
    impl Dims<f64> {
        pub fn aspect_ratio(&self) -> f64 {
            self.0 / self.1
        }
    }
    impl Dims<u32> {
        pub fn aspect_ratio(&self) -> f64 {
            f64::from(self.0) / f64::from(self.1)
        }
    }

}
