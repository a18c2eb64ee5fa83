mod form_screen_tests;
mod posts_screen_tests;
mod customers_screen_tests;
