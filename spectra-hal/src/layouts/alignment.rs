use std::fmt;

/// Alignment class of a signal as reported by the engine, one class per plane.
///
/// Only equality is meaningful: a plan specialised for one class may only be
/// executed on buffers of the same class.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    re: i32,
    im: Option<i32>,
}

impl Alignment {
    pub fn interleaved(class: i32) -> Self {
        Self { re: class, im: None }
    }

    pub fn split(re: i32, im: Option<i32>) -> Self {
        Self { re, im }
    }
}

impl fmt::Debug for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.im {
            None => write!(f, "Alignment({})", self.re),
            Some(im) => write!(f, "Alignment(re={}, im={im})", self.re),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_per_plane() {
        assert_eq!(Alignment::interleaved(0), Alignment::interleaved(0));
        assert_ne!(Alignment::interleaved(0), Alignment::interleaved(8));
        assert_ne!(Alignment::split(0, Some(0)), Alignment::split(0, Some(8)));
        assert_ne!(Alignment::split(0, None), Alignment::split(0, Some(0)));
    }
}
