mod health_test;
mod readings_test;
