mod auth_test;
mod db_test;
mod image_test;
