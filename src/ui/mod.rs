pub mod lessons;
pub mod plots;
pub mod scene;
pub mod sketch;
pub mod viewdata;
pub mod windows;
