pub mod m202512030001_create_readings;
