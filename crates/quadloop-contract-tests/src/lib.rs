#![forbid(unsafe_code)]

//! Behavioural contracts of the program builder and render loop, checked against in-memory
//! backends.



#[cfg(test)]
mod program_contract;
