#[cfg(test)]
mod signed_out_tests;
#[cfg(test)]
mod tier_update_tests;
