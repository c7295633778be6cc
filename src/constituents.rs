//! # Astronomical Constituent Tables
//!
//! Station-independent half of the harmonic model: the 37 constituent names,
//! their angular speeds, and the per-year equilibrium arguments and node
//! factors. Only a station's amplitudes and phase lags differ from site to
//! site, so every [`Station`](crate::station::Station) shares these tables.
//!
//! ## Layout
//! - Column order is fixed and matches [`NAMES`]. `LDA2` is published as `LAM2`
//!   by some agencies.
//! - Row `n` of [`EQUILARG`] / [`NODEFACTOR`] belongs to year `FIRST_YEAR + n`.
//! - Values are stored as `f32` to keep the tables small on flash-constrained
//!   targets; evaluation widens them to `f64`.
//!
//! Constituent data originate from NOAA CO-OPS via David Flater's XTide
//! harmonics files. Predictions are not fit for navigation.

use crate::error::TideError;

/// Number of harmonic constituents in every table.
pub const CONSTITUENT_COUNT: usize = 37;

/// First calendar year covered by the equilibrium argument and node factor rows.
pub const FIRST_YEAR: i32 = 2015;

/// Number of yearly rows.
pub const YEAR_COUNT: usize = 10;

/// Constituent names, in table column order.
pub const NAMES: [&str; CONSTITUENT_COUNT] = [
    "J1", "K1", "K2", "L2", "M1", "M2", "M3", "M4", "M6", "M8",
    "N2", "2N2", "O1", "OO1", "P1", "Q1", "2Q1", "R2", "S1", "S2",
    "S4", "S6", "T2", "LDA2", "MU2", "NU2", "RHO1", "MK3", "2MK3", "MN4",
    "MS4", "2SM2", "MF", "MSF", "MM", "SA", "SSA",
];

/// Angular speed of each constituent in degrees per hour.
pub const SPEED: [f32; CONSTITUENT_COUNT] = [
    15.58544, 15.04107, 30.08214, 29.52848, 14.49669, 28.9841, 43.47616, 57.96821,
    86.95231, 115.9364, 28.43973, 27.89535, 13.94304, 16.1391, 14.95893, 13.39866,
    12.85429, 30.04107, 15.0, 30.0, 60.0, 90.0, 29.95893, 29.45563,
    27.96821, 28.51258, 13.47151, 44.02517, 42.92714, 57.42383, 58.9841, 31.0159,
    1.098033, 1.015896, 0.5443747, 0.0410686, 0.0821373,
];

/// Equilibrium argument (degrees) of each constituent at 00:00 UTC on 1 January.
#[rustfmt::skip]
pub const EQUILARG: [[f32; CONSTITUENT_COUNT]; YEAR_COUNT] = [
    [
        83.38, 11.3, 202.4, 3.66, 322.99, 110.42, 165.63, 220.84,
        331.26, 81.68, 38.87, 327.32, 98.58, 105.09, 349.67, 27.03,
        315.49, 177.14, 180.0, 0.0, 0.0, 0.0, 2.86, 108.65,
        220.64, 292.19, 280.36, 121.72, 209.54, 149.29, 110.42, 249.58,
        93.25, 249.58, 71.55, 280.33, 200.67,
    ],
    [
        166.42, 7.56, 195.61, 182.09, 211.44, 210.46, 135.69, 60.92,
        271.39, 121.85, 50.19, 249.92, 204.31, 348.0, 349.9, 44.04,
        243.77, 176.88, 180.0, 0.0, 0.0, 0.0, 3.12, 19.21,
        61.44, 221.71, 215.56, 218.02, 53.36, 260.65, 210.46, 149.54,
        341.84, 149.54, 160.27, 280.1, 200.19,
    ],
    [
        264.33, 5.26, 191.35, 1.96, 102.4, 286.18, 69.27, 212.36,
        138.54, 64.72, 24.12, 122.06, 283.91, 260.62, 349.16, 21.85,
        119.79, 177.61, 180.0, 0.0, 0.0, 0.0, 2.39, 276.77,
        213.53, 115.59, 113.32, 291.44, 207.11, 310.3, 286.18, 73.82,
        258.36, 73.82, 262.06, 280.84, 201.69,
    ],
    [
        349.75, 2.87, 186.44, 202.17, 42.75, 26.41, 39.61, 52.82,
        79.23, 105.64, 35.63, 44.85, 27.45, 150.48, 349.4, 36.66,
        45.88, 177.35, 180.0, 0.0, 0.0, 0.0, 2.65, 187.53,
        54.51, 45.29, 46.33, 29.28, 49.95, 62.04, 26.41, 333.59,
        151.52, 333.59, 350.78, 280.6, 201.21,
    ],
    [
        76.92, 1.58, 183.41, 39.83, 314.62, 126.83, 10.24, 253.65,
        20.48, 147.31, 47.32, 327.82, 129.41, 45.42, 349.63, 49.91,
        330.4, 177.1, 180.0, 0.0, 0.0, 0.0, 2.9, 98.47,
        255.68, 335.19, 337.77, 128.41, 252.07, 174.15, 126.83, 233.17,
        48.0, 233.17, 79.5, 280.37, 200.73,
    ],
    [
        165.67, 1.37, 182.52, 211.35, 206.58, 227.47, 341.21, 94.94,
        322.41, 189.88, 59.24, 251.02, 230.02, 304.87, 349.87, 61.8,
        253.57, 176.84, 180.0, 0.0, 0.0, 0.0, 3.16, 9.64,
        97.08, 265.3, 267.86, 228.84, 93.57, 286.71, 227.47, 132.53,
        307.42, 132.53, 168.23, 280.13, 200.25,
    ],
    [
        269.75, 3.07, 185.62, 17.26, 90.25, 303.97, 275.96, 247.95,
        191.92, 135.9, 33.96, 123.94, 304.24, 235.22, 349.13, 34.23,
        124.21, 177.57, 180.0, 0.0, 0.0, 0.0, 2.43, 267.98,
        249.95, 159.97, 160.24, 307.04, 244.88, 337.93, 303.97, 56.03,
        235.49, 56.03, 270.01, 280.87, 201.75,
    ],
    [
        0.7, 4.49, 188.41, 224.35, 24.63, 45.09, 247.63, 90.18,
        135.26, 180.35, 46.35, 47.61, 43.13, 140.79, 349.36, 44.39,
        45.65, 177.32, 180.0, 0.0, 0.0, 0.0, 2.68, 179.62,
        91.82, 90.56, 88.6, 49.58, 85.68, 91.44, 45.09, 314.91,
        138.83, 314.91, 358.74, 280.64, 201.27,
    ],
    [
        92.29, 6.43, 192.41, 74.18, 317.02, 146.39, 219.58, 292.78,
        79.17, 225.56, 58.93, 331.47, 141.56, 48.09, 349.6, 54.1,
        326.64, 177.06, 180.0, 0.0, 0.0, 0.0, 2.94, 91.44,
        293.87, 21.33, 16.51, 152.82, 286.35, 205.32, 146.39, 213.61,
        43.26, 213.61, 87.46, 280.4, 200.79,
    ],
    [
        184.25, 8.66, 197.15, 246.07, 213.12, 247.82, 191.73, 135.64,
        23.46, 271.27, 71.64, 255.45, 239.75, 316.39, 349.84, 63.57,
        247.38, 176.8, 180.0, 0.0, 0.0, 0.0, 3.2, 3.4,
        136.06, 312.24, 304.17, 256.48, 126.97, 319.45, 247.82, 112.18,
        308.32, 112.18, 176.18, 280.16, 200.32,
    ],
];

/// Node factor of each constituent, held constant over the year.
#[rustfmt::skip]
pub const NODEFACTOR: [[f32; CONSTITUENT_COUNT]; YEAR_COUNT] = [
    [
        0.8278, 0.8824, 0.7472, 0.878, 1.5575, 1.0377, 1.0571, 1.0768,
        1.1173, 1.1594, 1.0377, 1.0377, 0.8068, 0.4868, 1.0, 0.8068,
        0.8068, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0377,
        1.0377, 1.0377, 0.8068, 0.9156, 0.9501, 1.0768, 1.0377, 1.0377,
        0.6271, 1.0377, 1.1307, 1.0, 1.0,
    ],
    [
        0.8343, 0.8864, 0.7533, 0.9704, 1.4048, 1.0367, 1.0556, 1.0747,
        1.1141, 1.155, 1.0367, 1.0367, 0.8135, 0.5, 1.0, 0.8135,
        0.8135, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0367,
        1.0367, 1.0367, 0.8135, 0.9189, 0.9526, 1.0747, 1.0367, 1.0367,
        0.6381, 1.0367, 1.1272, 1.0, 1.0,
    ],
    [
        0.8669, 0.9068, 0.7865, 1.1656, 0.9653, 1.0315, 1.0477, 1.0641,
        1.0977, 1.1323, 1.0315, 1.0315, 0.8475, 0.5711, 1.0, 0.8475,
        0.8475, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0315,
        1.0315, 1.0315, 0.8475, 0.9354, 0.965, 1.0641, 1.0315, 1.0315,
        0.6961, 1.0315, 1.109, 1.0, 1.0,
    ],
    [
        0.9176, 0.9394, 0.8458, 1.204, 0.9343, 1.0229, 1.0345, 1.0463,
        1.0702, 1.0947, 1.0229, 1.0229, 0.9011, 0.6981, 1.0, 0.9011,
        0.9011, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0229,
        1.0229, 1.0229, 0.9011, 0.9609, 0.9829, 1.0463, 1.0229, 1.0229,
        0.7936, 1.0229, 1.0783, 1.0, 1.0,
    ],
    [
        0.9761, 0.9782, 0.9272, 0.9582, 1.6115, 1.0117, 1.0176, 1.0235,
        1.0354, 1.0475, 1.0117, 1.0117, 0.9643, 0.8745, 1.0, 0.9643,
        0.9643, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0117,
        1.0117, 1.0117, 0.9643, 0.9897, 1.0012, 1.0235, 1.0117, 1.0117,
        0.9188, 1.0117, 1.039, 1.0, 1.0,
    ],
    [
        1.0336, 1.0176, 1.0225, 0.7337, 1.9813, 0.9992, 0.9989, 0.9985,
        0.9977, 0.9969, 0.9992, 0.9992, 1.0279, 1.0859, 1.0, 1.0279,
        1.0279, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9992,
        0.9992, 0.9992, 1.0279, 1.0168, 1.016, 0.9985, 0.9992, 0.9992,
        1.0571, 0.9992, 0.9955, 1.0, 1.0,
    ],
    [
        1.0836, 1.0529, 1.1201, 1.0649, 1.5936, 0.987, 0.9805, 0.9741,
        0.9614, 0.9489, 0.987, 0.987, 1.085, 1.309, 1.0, 1.085,
        1.085, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.987,
        0.987, 0.987, 1.085, 1.0392, 1.0257, 0.9741, 0.987, 0.987,
        1.1924, 0.987, 0.953, 1.0, 1.0,
    ],
    [
        1.1226, 1.0812, 1.2075, 1.3148, 1.0585, 0.9763, 0.9646, 0.9531,
        0.9305, 0.9084, 0.9763, 0.9763, 1.131, 1.5151, 1.0, 1.131,
        1.131, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9763,
        0.9763, 0.9763, 1.131, 1.0555, 1.0305, 0.9531, 0.9763, 0.9763,
        1.3097, 0.9763, 0.9161, 1.0, 1.0,
    ],
    [
        1.1492, 1.1009, 1.2736, 1.0393, 1.7582, 0.9683, 0.9528, 0.9376,
        0.9079, 0.8791, 0.9683, 0.9683, 1.1631, 1.6753, 1.0, 1.1631,
        1.1631, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9683,
        0.9683, 0.9683, 1.1631, 1.066, 1.0322, 0.9376, 0.9683, 0.9683,
        1.3967, 0.9683, 0.8888, 1.0, 1.0,
    ],
    [
        1.163, 1.1112, 1.3104, 0.5914, 2.2831, 0.9639, 0.9464, 0.9291,
        0.8956, 0.8633, 0.9639, 0.9639, 1.1801, 1.7658, 1.0, 1.1801,
        1.1801, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9639,
        0.9639, 0.9639, 1.1801, 1.0711, 1.0324, 0.9291, 0.9639, 0.9639,
        1.4444, 0.9639, 0.8738, 1.0, 1.0,
    ],
];

/// Last calendar year covered by the tables.
pub const fn last_year() -> i32 {
    FIRST_YEAR + YEAR_COUNT as i32 - 1
}

/// Map a calendar year to its row in [`EQUILARG`] and [`NODEFACTOR`].
pub fn year_index(year: i32) -> Result<usize, TideError> {
    if (FIRST_YEAR..=last_year()).contains(&year) {
        Ok((year - FIRST_YEAR) as usize)
    } else {
        Err(TideError::YearOutOfRange {
            year,
            first: FIRST_YEAR,
            last: last_year(),
        })
    }
}

/// Position of a constituent by name (case-insensitive, `LAM2` accepted for `LDA2`).
pub fn index_of(name: &str) -> Option<usize> {
    let wanted = name.trim().to_ascii_uppercase();
    let wanted = if wanted == "LAM2" { "LDA2".to_string() } else { wanted };
    NAMES.iter().position(|n| *n == wanted)
}
