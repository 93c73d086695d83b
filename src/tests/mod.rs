mod app;
mod form;
