//! CIEDE2000 color difference (CIE Technical Report 142-2001).
//!
//! Rough scale: below 1.0 imperceptible, 1-2 perceptible on close
//! inspection, 2-10 perceptible at a glance.

use std::f64::consts::PI;

use crate::color::Lab;

/// 25^7
const POW25_7: f64 = 6_103_515_625.0;

/// CIEDE2000 ΔE00 with kL = kC = kH = 1.
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1_ab = lab1.a.hypot(lab1.b);
    let c2_ab = lab2.a.hypot(lab2.b);
    let c_ab_mean = (c1_ab + c2_ab) / 2.0;

    let c_ab_mean_pow7 = c_ab_mean.powi(7);
    let g = 0.5 * (1.0 - (c_ab_mean_pow7 / (c_ab_mean_pow7 + POW25_7)).sqrt());

    let a1_prime = lab1.a * (1.0 + g);
    let a2_prime = lab2.a * (1.0 + g);

    let c1_prime = a1_prime.hypot(lab1.b);
    let c2_prime = a2_prime.hypot(lab2.b);

    let h1_prime = hue_angle(a1_prime, lab1.b);
    let h2_prime = hue_angle(a2_prime, lab2.b);

    let delta_l_prime = lab2.l - lab1.l;
    let delta_c_prime = c2_prime - c1_prime;

    let chroma_product = c1_prime * c2_prime;
    let delta_h_prime = if chroma_product == 0.0 {
        0.0
    } else {
        let delta_h = h2_prime - h1_prime;
        if delta_h.abs() <= 180.0 {
            delta_h
        } else if delta_h > 180.0 {
            delta_h - 360.0
        } else {
            delta_h + 360.0
        }
    };
    let delta_big_h_prime =
        2.0 * chroma_product.sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    let l_prime_mean = (lab1.l + lab2.l) / 2.0;
    let c_prime_mean = (c1_prime + c2_prime) / 2.0;

    let h_prime_mean = if chroma_product == 0.0 {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let h_rad = h_prime_mean.to_radians();
    let t = 1.0 - 0.17 * (h_rad - PI / 6.0).cos()
        + 0.24 * (2.0 * h_rad).cos()
        + 0.32 * (3.0 * h_rad + PI / 30.0).cos()
        - 0.20 * (4.0 * h_rad - 63.0_f64.to_radians()).cos();

    let l_offset_sq = (l_prime_mean - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let sc = 1.0 + 0.045 * c_prime_mean;
    let sh = 1.0 + 0.015 * c_prime_mean * t;

    // Rotation term for the blue region
    let delta_theta = 30.0 * (-((h_prime_mean - 275.0) / 25.0).powi(2)).exp();
    let c_prime_mean_pow7 = c_prime_mean.powi(7);
    let rc = 2.0 * (c_prime_mean_pow7 / (c_prime_mean_pow7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let term_l = delta_l_prime / sl;
    let term_c = delta_c_prime / sc;
    let term_h = delta_big_h_prime / sh;

    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h)
        .max(0.0)
        .sqrt()
}

/// Hue angle in degrees (0..360); 0 for the achromatic axis.
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}
