pub mod city_loader;
pub mod observation_reader;

pub use city_loader::CityLoader;
pub use observation_reader::ObservationReader;
