//! Built-in domain presets
//!
//! Each preset is JSON data. Weights are the reference combination for the
//! domain; stream names must match the store the preset is applied to.

use serde_json::{json, Value};

/// Automotive perception stack v1
///
/// Lidar and radar dominate; GPS accuracy contributes least. Sampled at
/// 100 Hz with a 10 ms perception latency budget.
pub fn automotive_v1() -> Value {
    json!({
        "name": "automotive",
        "version": "v1",
        "description": "Lidar, radar, camera, IMU and GPS fusion for vehicle perception",
        "sampling_rate_hz": 100.0,
        "real_time_target_ms": 10.0,
        "weights": {
            "lidar": 0.35,
            "radar": 0.30,
            "camera": 0.20,
            "imu": 0.10,
            "gps": 0.05
        }
    })
}

/// Biosignal monitoring v1
///
/// ECG carries half the weight. Sampled at 240 Hz with a 5 ms budget.
pub fn biosignal_v1() -> Value {
    json!({
        "name": "biosignal",
        "version": "v1",
        "description": "ECG, EEG and EMG fusion for physiological monitoring",
        "sampling_rate_hz": 240.0,
        "real_time_target_ms": 5.0,
        "weights": {
            "ecg": 0.5,
            "eeg": 0.3,
            "emg": 0.2
        }
    })
}

/// Every built-in preset, oldest first
pub fn builtin() -> Vec<Value> {
    vec![automotive_v1(), biosignal_v1()]
}
