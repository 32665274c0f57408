use crate::types::Component;
use crate::utils::Timer;
use log::info;
use ndarray::ArrayView1;

pub fn print_kubo_init(n_bands: usize, lmax: usize, nmax: usize, n_valence: usize, volume: f64) {
    info!("{:^80}", "");
    info!("{: ^80}", "Kubo-Greenwood Conductivity");
    info!("{:-^80}", "");
    info!("{: <25} {}", "number of bands:", n_bands);
    info!("{: <25} {}", "lmax:", lmax);
    info!("{: <25} {}", "nmax:", nmax);
    info!("{: <25} {}", "valence orbitals:", n_valence);
    info!("{: <25} {:.8e} Bohr^3", "sphere volume:", volume);
    info!("{:-^80}", "");
}

pub fn print_integrated_conductivity(component: Component, sigma: f64, n_elec: f64, timer: &Timer) {
    info!(
        "{: <10} {: <26} {:>24.14}",
        component.tag(),
        "integrated conductivity:",
        sigma
    );
    info!("{: <10} {: <26} {:>24.14}", "", "electrons (TRK sum rule):", n_elec);
    info!("{}", timer);
}

pub fn print_spectrum(
    component: Component,
    gamma: f64,
    max_freq: f64,
    n_freq: usize,
    n_elec: f64,
    timer: &Timer,
) {
    info!("{:^80}", "");
    info!("{: ^80}", "Dynamical Conductivity");
    info!("{:-^80}", "");
    info!("{: <25} {}", "component:", component.tag());
    info!("{: <25} {}", "Lorentzian width:", gamma);
    info!("{: <25} {}", "max. frequency:", max_freq);
    info!("{: <25} {}", "frequency points:", n_freq);
    info!("{: <25} {:>24.14}", "electrons (TRK sum rule):", n_elec);
    info!("{:-^80}", "");
    info!("{}", timer);
}

pub fn print_sum_rule(l: usize, n: usize, m: i64, sum_mom: ArrayView1<f64>) {
    info!("{:^80}", "");
    info!(
        "{: <25} l = {}, n = {}, m = {}",
        "momentum sum rule for:", l, n, m
    );
    info!("{: >5} {: >24}", "band", "sum (ideal: 0.5)");
    info!("{:-^30} ", "");
    for (k, value) in sum_mom.iter().enumerate() {
        info!("{: >5} {: >24.14}", k, value);
    }
    info!("{:-^30} ", "");
}
