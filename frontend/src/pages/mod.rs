pub mod archive_page;
pub mod blog_page;
pub mod home_page;
pub mod project_page;
pub mod video_page;
