pub mod frozen_graph_backend;
pub mod landmark_model;
pub mod mark_detector_factory;
pub mod packaged_model_backend;
