mod calibration;
mod common;
