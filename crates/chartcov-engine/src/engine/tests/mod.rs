mod common;

mod feature_marks;
