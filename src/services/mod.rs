pub mod processor;

pub use processor::{
    convert_files, describe_file, dither_file, draw_line_file, invert_file, mirror_file,
    process_file, rotate_file, DitherJob, ImageSummary, LineJob,
};
