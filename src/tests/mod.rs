mod app;
mod presentation;
