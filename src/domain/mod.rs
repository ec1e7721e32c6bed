// Domain layer: core models and ports (interfaces) for the capture -> OCR -> report pipeline.

pub mod model;
pub mod ports;
