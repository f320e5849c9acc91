pub mod crossover;
pub mod curve;
pub mod domain;
pub mod partition;
pub mod ranking;
pub mod tariff;
