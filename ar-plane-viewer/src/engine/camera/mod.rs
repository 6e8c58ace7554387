pub mod observer_camera;
