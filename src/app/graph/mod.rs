mod build;
mod hit;
mod interaction;
mod view;

pub(in crate::app) use interaction::CLICK_THRESHOLD;
