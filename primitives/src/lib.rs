mod address;
mod balance;
mod family;
mod operation;

pub use {
  address::{Address, AddressCodec, Error as AddressError, Namespace},
  balance::{decode as decode_balance, encode as encode_balance, Error as BalanceError},
  family::{Family, DEFAULT_FAMILY_NAME, DEFAULT_FAMILY_VERSION},
  operation::{FormatError, Operation, OperationKind},
};
