//! Host functions, authorization trees and Soroban resource declarations.

use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::codec::{convert_asset, string_lossy};
use crate::entry::convert_ledger_key;
use crate::scval::{convert_contract_executable, convert_sc_address, convert_sc_val, convert_sc_vals};

pub fn convert_host_function(function: &xdr::HostFunction) -> model::HostFunction {
    match function {
        xdr::HostFunction::InvokeContract(args) => {
            model::HostFunction::InvokeContract(convert_invoke_args(args))
        }
        xdr::HostFunction::CreateContract(args) => {
            model::HostFunction::CreateContract(convert_create_args(args))
        }
        xdr::HostFunction::UploadContractWasm(code) => {
            model::HostFunction::UploadContractWasm(hex::encode(code.as_slice()))
        }
        xdr::HostFunction::CreateContractV2(args) => {
            model::HostFunction::CreateContractV2(convert_create_args_v2(args))
        }
    }
}

fn convert_invoke_args(args: &xdr::InvokeContractArgs) -> model::InvokeContractArgs {
    model::InvokeContractArgs {
        contract_address: convert_sc_address(&args.contract_address),
        function_name: string_lossy(args.function_name.0.as_vec()),
        args: convert_sc_vals(&args.args),
    }
}

fn convert_create_args(args: &xdr::CreateContractArgs) -> model::CreateContractArgs {
    model::CreateContractArgs {
        contract_id_preimage: convert_preimage(&args.contract_id_preimage),
        executable: convert_contract_executable(&args.executable),
        constructor_args: None,
    }
}

fn convert_create_args_v2(args: &xdr::CreateContractArgsV2) -> model::CreateContractArgs {
    model::CreateContractArgs {
        contract_id_preimage: convert_preimage(&args.contract_id_preimage),
        executable: convert_contract_executable(&args.executable),
        constructor_args: Some(convert_sc_vals(&args.constructor_args)),
    }
}

fn convert_preimage(preimage: &xdr::ContractIdPreimage) -> model::ContractIdPreimage {
    match preimage {
        xdr::ContractIdPreimage::Address(from) => model::ContractIdPreimage::Address {
            address: convert_sc_address(&from.address),
            salt: hex::encode(from.salt.0),
        },
        xdr::ContractIdPreimage::Asset(asset) => {
            model::ContractIdPreimage::Asset(convert_asset(asset))
        }
    }
}

pub fn convert_authorization_entry(
    entry: &xdr::SorobanAuthorizationEntry,
) -> model::SorobanAuthorizationEntry {
    let credentials = match &entry.credentials {
        xdr::SorobanCredentials::SourceAccount => model::SorobanCredentials::SourceAccount,
        xdr::SorobanCredentials::Address(c) => {
            model::SorobanCredentials::Address(model::SorobanAddressCredentials {
                address: convert_sc_address(&c.address),
                nonce: c.nonce,
                signature_expiration_ledger: c.signature_expiration_ledger,
                signature: convert_sc_val(&c.signature),
            })
        }
    };
    model::SorobanAuthorizationEntry {
        credentials,
        root_invocation: convert_invocation(&entry.root_invocation),
    }
}

fn convert_invocation(
    invocation: &xdr::SorobanAuthorizedInvocation,
) -> model::SorobanAuthorizedInvocation {
    let function = match &invocation.function {
        xdr::SorobanAuthorizedFunction::ContractFn(args) => {
            model::SorobanAuthorizedFunction::ContractFn(convert_invoke_args(args))
        }
        xdr::SorobanAuthorizedFunction::CreateContractHostFn(args) => {
            model::SorobanAuthorizedFunction::CreateContractHostFn(convert_create_args(args))
        }
        xdr::SorobanAuthorizedFunction::CreateContractV2HostFn(args) => {
            model::SorobanAuthorizedFunction::CreateContractV2HostFn(convert_create_args_v2(args))
        }
    };
    model::SorobanAuthorizedInvocation {
        function,
        sub_invocations: invocation
            .sub_invocations
            .iter()
            .map(convert_invocation)
            .collect(),
    }
}

/// Resource declaration of a Soroban transaction.
pub fn convert_soroban_data(data: &xdr::SorobanTransactionData) -> model::SorobanTransactionData {
    let footprint = &data.resources.footprint;
    let archived_soroban_entries = match &data.ext {
        xdr::SorobanTransactionDataExt::V0 => None,
        xdr::SorobanTransactionDataExt::V1(ext) => Some(ext.archived_soroban_entries.to_vec()),
    };
    model::SorobanTransactionData {
        resources: model::SorobanResources {
            footprint: model::LedgerFootprint {
                read_only: footprint.read_only.iter().map(convert_ledger_key).collect(),
                read_write: footprint.read_write.iter().map(convert_ledger_key).collect(),
            },
            instructions: data.resources.instructions,
            disk_read_bytes: data.resources.disk_read_bytes,
            write_bytes: data.resources.write_bytes,
        },
        resource_fee: data.resource_fee,
        archived_soroban_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdr::{ContractId, Hash, ScSymbol, StringM};

    fn invoke(name: &str) -> xdr::InvokeContractArgs {
        xdr::InvokeContractArgs {
            contract_address: xdr::ScAddress::Contract(ContractId(Hash([1; 32]))),
            function_name: ScSymbol(StringM::try_from(name).unwrap()),
            args: vec![xdr::ScVal::U32(3)].try_into().unwrap(),
        }
    }

    #[test]
    fn test_invoke_contract() {
        let converted = convert_host_function(&xdr::HostFunction::InvokeContract(invoke("mint")));
        match converted {
            model::HostFunction::InvokeContract(args) => {
                assert_eq!(args.function_name, "mint");
                assert_eq!(args.args, vec![model::ScVal::U32(3)]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_constructor_args_only_for_v2() {
        let preimage = xdr::ContractIdPreimage::Asset(xdr::Asset::Native);
        let v1 = xdr::HostFunction::CreateContract(xdr::CreateContractArgs {
            contract_id_preimage: preimage.clone(),
            executable: xdr::ContractExecutable::StellarAsset,
        });
        let v2 = xdr::HostFunction::CreateContractV2(xdr::CreateContractArgsV2 {
            contract_id_preimage: preimage,
            executable: xdr::ContractExecutable::StellarAsset,
            constructor_args: Vec::new().try_into().unwrap(),
        });
        match (convert_host_function(&v1), convert_host_function(&v2)) {
            (model::HostFunction::CreateContract(a), model::HostFunction::CreateContractV2(b)) => {
                assert_eq!(a.constructor_args, None);
                assert_eq!(b.constructor_args, Some(vec![]));
                assert_eq!(a.contract_id_preimage, model::ContractIdPreimage::Asset(model::Asset::Native));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nested_authorization() {
        let entry = xdr::SorobanAuthorizationEntry {
            credentials: xdr::SorobanCredentials::SourceAccount,
            root_invocation: xdr::SorobanAuthorizedInvocation {
                function: xdr::SorobanAuthorizedFunction::ContractFn(invoke("outer")),
                sub_invocations: vec![xdr::SorobanAuthorizedInvocation {
                    function: xdr::SorobanAuthorizedFunction::ContractFn(invoke("inner")),
                    sub_invocations: Vec::new().try_into().unwrap(),
                }]
                .try_into()
                .unwrap(),
            },
        };
        let converted = convert_authorization_entry(&entry);
        assert_eq!(converted.credentials, model::SorobanCredentials::SourceAccount);
        assert_eq!(converted.root_invocation.sub_invocations.len(), 1);
    }

    #[test]
    fn test_archived_entries_from_extension() {
        let data = xdr::SorobanTransactionData {
            ext: xdr::SorobanTransactionDataExt::V1(xdr::SorobanResourcesExtV0 {
                archived_soroban_entries: vec![0u32, 2].try_into().unwrap(),
            }),
            resources: xdr::SorobanResources {
                footprint: xdr::LedgerFootprint {
                    read_only: Vec::new().try_into().unwrap(),
                    read_write: Vec::new().try_into().unwrap(),
                },
                instructions: 100,
                disk_read_bytes: 10,
                write_bytes: 5,
            },
            resource_fee: 77,
        };
        let converted = convert_soroban_data(&data);
        assert_eq!(converted.archived_soroban_entries, Some(vec![0, 2]));
        assert_eq!(converted.resource_fee, 77);
        assert_eq!(converted.resources.instructions, 100);
    }
}
