//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbor at that offset receives
/// `error * weight / divisor`. Offsets are written for a left-to-right
/// scan; right-to-left rows negate `dx`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 1, 1),  // bottom-right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 0, 7),  // right
    ],
    divisor: 16,
};
