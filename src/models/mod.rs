pub mod visa_stat;
