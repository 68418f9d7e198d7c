pub mod shift_register;
