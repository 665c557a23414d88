//! Two-dimensional simplex noise over a fixed permutation table.
//!
//! The plane is tiled with equilateral triangles by skewing the input point
//! into lattice space. Each of the three triangle corners carries a pseudo
//! random gradient chosen by hashing its lattice coordinates through
//! [`PERM`]; the corner contributes `t⁴ · (gradient · offset)` with radial
//! falloff `t = 0.5 - |offset|²`. The noise is deterministic: there is no
//! seed, and the same point always produces bit-identical output.

/// Skew factor from Cartesian into lattice space: `(√3 - 1) / 2`.
pub const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskew factor from lattice into Cartesian space: `(3 - √3) / 6`.
pub const G2: f64 = (3.0 - SQRT_3) / 6.0;

const SQRT_3: f64 = 1.732_050_807_568_877_293_5;

/// Falloff radius squared; corners farther than this contribute nothing.
const FALLOFF: f64 = 0.5;

/// Ken Perlin's reference permutation with one altered byte: entry 114 is
/// 35 instead of 135, so 35 occurs twice and 135 never. Generated fields
/// depend on it byte for byte.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 35, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186,
    3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206, 59,
    227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163, 70,
    221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const fn doubled(p: [u8; 256]) -> [u8; 512] {
    let mut out = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        out[i] = p[i & 255];
        i += 1;
    }
    out
}

/// The lattice hash table: [`PERMUTATION`] repeated twice so that
/// `PERM[a + PERM[b]]` never needs a modulo for `a, b` in `0..=256`.
///
/// Every generated field depends on each of these bytes; changing one value
/// changes the noise everywhere.
pub const PERM: [u8; 512] = doubled(PERMUTATION);

/// Read-only lookup into [`PERM`]. Returns `None` for indices past 511.
pub fn perm(index: usize) -> Option<u8> {
    PERM.get(index).copied()
}

/// Lattice coordinate `cell` (an integral float) reduced into `0..256`.
///
/// Stays in f64 so coordinates past the i64 range still wrap. Non-finite
/// cells map to 0.
#[inline]
pub fn wrap_cell(cell: f64) -> usize {
    (cell.rem_euclid(256.0) as usize) & 255
}

/// Dot product of `(x, y)` with one of eight gradients `(±1, ±2)` / `(±2, ±1)`
/// picked by the low three bits of `hash`.
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 7;
    let (u, v) = if h < 4 { (x, y) } else { (y, x) };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    u + v
}

/// Contribution of one triangle corner at offset `(dx, dy)`.
#[inline]
fn corner(hash: u8, dx: f64, dy: f64) -> f64 {
    let t = FALLOFF - dx * dx - dy * dy;
    // NaN offsets come from coordinates whose sum overflowed
    if t <= 0.0 || t.is_nan() {
        return 0.0;
    }
    let t2 = t * t;
    t2 * t2 * grad(hash, dx, dy)
}

/// Samples simplex noise at `(x, y)`.
///
/// The result is continuous in both coordinates and bounded well inside
/// [-1, 1]. Lattice indices wrap at 256, so the noise is periodic along the
/// lattice axes and arbitrarily large or negative inputs are safe. Once a
/// coordinate is past 2^52 the offset inside the cell has no precision left
/// and the sample degrades to a bounded, deterministic value (often 0).
pub fn evaluate(x: f64, y: f64) -> f64 {
    // Skew into lattice space and find the containing cell.
    let s = (x + y) * F2;
    let i = (x + s).floor();
    let j = (y + s).floor();

    // Unskew the cell origin and take the offset from it.
    let t = (i + j) * G2;
    let x0 = x - (i - t);
    let y0 = y - (j - t);

    // Lower triangle (0,0)->(1,0)->(1,1), upper triangle (0,0)->(0,1)->(1,1).
    let (i1, j1): (usize, usize) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f64 + G2;
    let y1 = y0 - j1 as f64 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = wrap_cell(i);
    let jj = wrap_cell(j);

    let h0 = PERM[ii + PERM[jj] as usize];
    let h1 = PERM[ii + i1 + PERM[jj + j1] as usize];
    let h2 = PERM[ii + 1 + PERM[jj + 1] as usize];

    corner(h0, x0, y0) + corner(h1, x1, y1) + corner(h2, x2, y2)
}
