//! Synthetic multi-sensor signal generators
//!
//! Signals are sums of sinusoids plus Gaussian noise scaled by a noise level,
//! modelled on typical sensor behaviour:
//! - Automotive: lidar range, radar velocity, camera feature strength,
//!   IMU magnitude, GPS accuracy (100 Hz)
//! - Biosignal: ECG rhythm, EEG alpha/beta, EMG noise burst (240 Hz)

use std::f64::consts::PI;

use super::harness::TestRng;

pub const AUTOMOTIVE_RATE_HZ: f64 = 100.0;
pub const BIOSIGNAL_RATE_HZ: f64 = 240.0;

/// `Σ amp · sin(2π·f·t + phase)` over `len` samples at `rate_hz`
pub fn sinusoids(len: usize, rate_hz: f64, components: &[(f64, f64, f64)]) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 / rate_hz;
            components
                .iter()
                .map(|&(amp, freq, phase)| amp * (2.0 * PI * freq * t + phase).sin())
                .sum()
        })
        .collect()
}

fn add_noise(signal: &mut [f64], rng: &mut TestRng, std_dev: f64) {
    for v in signal.iter_mut() {
        *v += std_dev * rng.gaussian();
    }
}

/// Five automotive streams at `noise_level`
pub fn automotive(len: usize, noise_level: f64, seed: u32) -> Vec<(&'static str, Vec<f64>)> {
    let mut rng = TestRng::new(seed);
    let rate = AUTOMOTIVE_RATE_HZ;

    let mut lidar = sinusoids(len, rate, &[(50.0, 0.5, 0.0), (10.0, 2.0, 0.3)]);
    add_noise(&mut lidar, &mut rng, noise_level * 5.0);

    let mut radar = sinusoids(len, rate, &[(30.0, 1.0, 0.0), (15.0, 3.0, 0.5)]);
    add_noise(&mut radar, &mut rng, noise_level * 3.0);

    let mut camera = sinusoids(len, rate, &[(0.7, 0.3, 0.0), (0.2, 1.5, 0.8)]);
    add_noise(&mut camera, &mut rng, noise_level * 0.1);
    camera.iter_mut().for_each(|v| *v = v.clamp(0.0, 1.0));

    let mut imu = sinusoids(len, rate, &[(2.0, 0.8, 0.0), (0.5, 5.0, 1.2)]);
    add_noise(&mut imu, &mut rng, noise_level * 0.3);

    let mut gps = sinusoids(len, rate, &[(0.9, 0.1, 0.0)]);
    add_noise(&mut gps, &mut rng, noise_level * 0.15);
    gps.iter_mut().for_each(|v| *v = v.clamp(0.3, 1.0));

    vec![
        ("camera", camera),
        ("gps", gps),
        ("imu", imu),
        ("lidar", lidar),
        ("radar", radar),
    ]
}

/// ECG, EEG and EMG streams
pub fn biosignal(len: usize, seed: u32) -> Vec<(&'static str, Vec<f64>)> {
    let mut rng = TestRng::new(seed);
    let rate = BIOSIGNAL_RATE_HZ;

    let mut ecg = sinusoids(len, rate, &[(0.8, 1.5, 0.0)]);
    add_noise(&mut ecg, &mut rng, 0.1);

    let mut eeg = sinusoids(len, rate, &[(0.4, 10.0, 0.0), (0.15, 22.0, 0.5)]);
    add_noise(&mut eeg, &mut rng, 0.05);

    let mut emg = rng.gaussian_vec(len, 0.15);
    for (v, s) in emg.iter_mut().zip(sinusoids(len, rate, &[(0.05, 50.0, 0.0)])) {
        *v += s;
    }

    vec![("ecg", ecg), ("eeg", eeg), ("emg", emg)]
}
