pub mod annotation {
    pub mod label_font;
    pub mod painter;
}

pub mod detection {
    pub mod domain {
        pub mod detection_result;
        pub mod face_detector;
        pub mod facebox;
    }
    pub mod infrastructure;
}

pub mod landmarks {
    pub mod domain {
        pub mod landmark_backend;
        pub mod landmark_set;
        pub mod mark_detector;
    }
    pub mod infrastructure;
}

pub mod shared {
    pub mod bounding_box;
    pub mod constants;
    pub mod frame;
    pub mod image_io;
    pub mod model_error;
    pub mod model_resolver;
    pub mod onnx_session;
}
