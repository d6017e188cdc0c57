//! Error diffusion kernels.
//!
//! Each kernel lists the not-yet-visited neighbours that receive a share
//! of a pixel's quantization error.

/// An error diffusion kernel.
///
/// The share propagated is `sum(weights) / divisor`. Atkinson propagates
/// only 75%; the others propagate everything.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries. `dy` is never negative and `dx` is
    /// positive whenever `dy` is zero, so targets are always ahead of the
    /// scan position.
    pub entries: &'static [(i32, i32, u8)],

    /// Each neighbour receives `error * weight / divisor`.
    pub divisor: u8,

    /// Largest `dy` among the entries.
    pub max_dy: usize,
}

impl Kernel {
    /// Fraction of the error this kernel propagates.
    pub fn propagation(&self) -> f64 {
        let total: u32 = self.entries.iter().map(|&(_, _, w)| u32::from(w)).sum();
        f64::from(total) / f64::from(self.divisor)
    }
}

/// Floyd-Steinberg.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
    max_dy: 1,
};

/// Jarvis-Judice-Ninke: twelve neighbours over three rows.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

/// Sierra-3.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
};

/// Atkinson: six neighbours of 1/8 each, a quarter of the error is dropped.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
    max_dy: 2,
};
