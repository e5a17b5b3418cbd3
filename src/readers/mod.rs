pub mod city_reader;

pub use city_reader::CityReader;
