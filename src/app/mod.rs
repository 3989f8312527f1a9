pub mod collect_results_use_case;
pub mod convert_registration_use_case;
pub mod ports;
