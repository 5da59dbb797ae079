//! Ledger entries, keys and entry changes.

use henyey_common::Hash256;
use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::codec::{
    account, balance_id, constant_product_parameters, convert_asset, convert_claimants,
    convert_liabilities, convert_price, convert_signer, convert_trust_line_asset, pool_id,
    string_lossy,
};
use crate::config_setting::{convert_config_setting, convert_config_setting_id};
use crate::scval::{convert_sc_address, convert_sc_val};

pub fn convert_ledger_entry_change(change: &xdr::LedgerEntryChange) -> model::LedgerEntryChange {
    match change {
        xdr::LedgerEntryChange::Created(e) => model::LedgerEntryChange::Created(convert_ledger_entry(e)),
        xdr::LedgerEntryChange::Updated(e) => model::LedgerEntryChange::Updated(convert_ledger_entry(e)),
        xdr::LedgerEntryChange::Removed(k) => model::LedgerEntryChange::Removed(convert_ledger_key(k)),
        xdr::LedgerEntryChange::State(e) => model::LedgerEntryChange::State(convert_ledger_entry(e)),
        xdr::LedgerEntryChange::Restored(e) => {
            model::LedgerEntryChange::Restored(convert_ledger_entry(e))
        }
    }
}

pub(crate) fn convert_changes(changes: &[xdr::LedgerEntryChange]) -> Vec<model::LedgerEntryChange> {
    changes.iter().map(convert_ledger_entry_change).collect()
}

pub fn convert_ledger_entry(entry: &xdr::LedgerEntry) -> model::LedgerEntry {
    let sponsor = match &entry.ext {
        xdr::LedgerEntryExt::V0 => None,
        xdr::LedgerEntryExt::V1(v1) => v1.sponsoring_id.0.as_ref().map(account),
    };
    model::LedgerEntry {
        last_modified_ledger_seq: entry.last_modified_ledger_seq,
        sponsor,
        data: convert_entry_data(&entry.data),
    }
}

fn convert_entry_data(data: &xdr::LedgerEntryData) -> model::LedgerEntryData {
    match data {
        xdr::LedgerEntryData::Account(a) => model::LedgerEntryData::Account(convert_account(a)),
        xdr::LedgerEntryData::Trustline(t) => model::LedgerEntryData::Trustline(convert_trust_line(t)),
        xdr::LedgerEntryData::Offer(o) => model::LedgerEntryData::Offer(convert_offer(o)),
        xdr::LedgerEntryData::Data(d) => model::LedgerEntryData::Data(model::DataEntry {
            account_id: account(&d.account_id),
            data_name: string_lossy(d.data_name.as_vec()),
            data_value: hex::encode(d.data_value.0.as_slice()),
        }),
        xdr::LedgerEntryData::ClaimableBalance(c) => {
            model::LedgerEntryData::ClaimableBalance(model::ClaimableBalanceEntry {
                balance_id: balance_id(&c.balance_id),
                claimants: convert_claimants(&c.claimants),
                asset: convert_asset(&c.asset),
                amount: c.amount,
                flags: match &c.ext {
                    xdr::ClaimableBalanceEntryExt::V0 => None,
                    xdr::ClaimableBalanceEntryExt::V1(v1) => Some(v1.flags),
                },
            })
        }
        xdr::LedgerEntryData::LiquidityPool(p) => {
            let body = match &p.body {
                xdr::LiquidityPoolEntryBody::LiquidityPoolConstantProduct(cp) => {
                    model::LiquidityPoolBody::ConstantProduct(model::ConstantProductPool {
                        params: constant_product_parameters(&cp.params),
                        reserve_a: cp.reserve_a,
                        reserve_b: cp.reserve_b,
                        total_pool_shares: cp.total_pool_shares,
                        pool_shares_trust_line_count: cp.pool_shares_trust_line_count,
                    })
                }
            };
            model::LedgerEntryData::LiquidityPool(model::LiquidityPoolEntry {
                liquidity_pool_id: pool_id(&p.liquidity_pool_id),
                body,
            })
        }
        xdr::LedgerEntryData::ContractData(c) => {
            model::LedgerEntryData::ContractData(model::ContractDataEntry {
                contract: convert_sc_address(&c.contract),
                key: convert_sc_val(&c.key),
                durability: convert_durability(c.durability),
                val: convert_sc_val(&c.val),
            })
        }
        xdr::LedgerEntryData::ContractCode(c) => {
            let cost_inputs = match &c.ext {
                xdr::ContractCodeEntryExt::V0 => None,
                xdr::ContractCodeEntryExt::V1(v1) => {
                    let i = &v1.cost_inputs;
                    Some(model::ContractCodeCostInputs {
                        n_instructions: i.n_instructions,
                        n_functions: i.n_functions,
                        n_globals: i.n_globals,
                        n_table_entries: i.n_table_entries,
                        n_types: i.n_types,
                        n_data_segments: i.n_data_segments,
                        n_elem_segments: i.n_elem_segments,
                        n_imports: i.n_imports,
                        n_exports: i.n_exports,
                        n_data_segment_bytes: i.n_data_segment_bytes,
                    })
                }
            };
            model::LedgerEntryData::ContractCode(model::ContractCodeEntry {
                hash: Hash256::from(&c.hash),
                code: hex::encode(c.code.as_slice()),
                cost_inputs,
            })
        }
        xdr::LedgerEntryData::ConfigSetting(s) => {
            model::LedgerEntryData::ConfigSetting(convert_config_setting(s))
        }
        xdr::LedgerEntryData::Ttl(t) => model::LedgerEntryData::Ttl(model::TtlEntry {
            key_hash: Hash256::from(&t.key_hash),
            live_until_ledger_seq: t.live_until_ledger_seq,
        }),
    }
}

fn convert_account(a: &xdr::AccountEntry) -> model::AccountEntry {
    let mut entry = model::AccountEntry {
        account_id: account(&a.account_id),
        balance: a.balance,
        seq_num: a.seq_num.0,
        num_sub_entries: a.num_sub_entries,
        inflation_dest: a.inflation_dest.as_ref().map(account),
        flags: a.flags,
        home_domain: string_lossy(a.home_domain.as_vec()),
        thresholds: model::Thresholds {
            master_weight: a.thresholds.0[0],
            low: a.thresholds.0[1],
            medium: a.thresholds.0[2],
            high: a.thresholds.0[3],
        },
        signers: a.signers.iter().map(convert_signer).collect(),
        liabilities: None,
        num_sponsored: None,
        num_sponsoring: None,
        signer_sponsoring_ids: None,
        seq_ledger: None,
        seq_time: None,
    };

    let xdr::AccountEntryExt::V1(v1) = &a.ext else {
        return entry;
    };
    entry.liabilities = Some(convert_liabilities(&v1.liabilities));

    let xdr::AccountEntryExtensionV1Ext::V2(v2) = &v1.ext else {
        return entry;
    };
    entry.num_sponsored = Some(v2.num_sponsored);
    entry.num_sponsoring = Some(v2.num_sponsoring);
    entry.signer_sponsoring_ids = Some(
        v2.signer_sponsoring_i_ds
            .iter()
            .map(|d| d.0.as_ref().map(account))
            .collect(),
    );

    if let xdr::AccountEntryExtensionV2Ext::V3(v3) = &v2.ext {
        entry.seq_ledger = Some(v3.seq_ledger);
        entry.seq_time = Some(v3.seq_time.0);
    }
    entry
}

fn convert_trust_line(t: &xdr::TrustLineEntry) -> model::TrustLineEntry {
    let (liabilities, liquidity_pool_use_count) = match &t.ext {
        xdr::TrustLineEntryExt::V0 => (None, None),
        xdr::TrustLineEntryExt::V1(v1) => {
            let use_count = match &v1.ext {
                xdr::TrustLineEntryV1Ext::V0 => None,
                xdr::TrustLineEntryV1Ext::V2(v2) => Some(v2.liquidity_pool_use_count),
            };
            (Some(convert_liabilities(&v1.liabilities)), use_count)
        }
    };
    model::TrustLineEntry {
        account_id: account(&t.account_id),
        asset: convert_trust_line_asset(&t.asset),
        balance: t.balance,
        limit: t.limit,
        flags: t.flags,
        liabilities,
        liquidity_pool_use_count,
    }
}

pub(crate) fn convert_offer(o: &xdr::OfferEntry) -> model::OfferEntry {
    model::OfferEntry {
        seller_id: account(&o.seller_id),
        offer_id: o.offer_id,
        selling: convert_asset(&o.selling),
        buying: convert_asset(&o.buying),
        amount: o.amount,
        price: convert_price(&o.price),
        flags: o.flags,
    }
}

fn convert_durability(d: xdr::ContractDataDurability) -> model::ContractDataDurability {
    match d {
        xdr::ContractDataDurability::Temporary => model::ContractDataDurability::Temporary,
        xdr::ContractDataDurability::Persistent => model::ContractDataDurability::Persistent,
    }
}

pub fn convert_ledger_key(key: &xdr::LedgerKey) -> model::LedgerKey {
    match key {
        xdr::LedgerKey::Account(k) => model::LedgerKey::Account {
            account_id: account(&k.account_id),
        },
        xdr::LedgerKey::Trustline(k) => model::LedgerKey::Trustline {
            account_id: account(&k.account_id),
            asset: convert_trust_line_asset(&k.asset),
        },
        xdr::LedgerKey::Offer(k) => model::LedgerKey::Offer {
            seller_id: account(&k.seller_id),
            offer_id: k.offer_id,
        },
        xdr::LedgerKey::Data(k) => model::LedgerKey::Data {
            account_id: account(&k.account_id),
            data_name: string_lossy(k.data_name.as_vec()),
        },
        xdr::LedgerKey::ClaimableBalance(k) => model::LedgerKey::ClaimableBalance {
            balance_id: balance_id(&k.balance_id),
        },
        xdr::LedgerKey::LiquidityPool(k) => model::LedgerKey::LiquidityPool {
            liquidity_pool_id: pool_id(&k.liquidity_pool_id),
        },
        xdr::LedgerKey::ContractData(k) => model::LedgerKey::ContractData {
            contract: convert_sc_address(&k.contract),
            key: convert_sc_val(&k.key),
            durability: convert_durability(k.durability),
        },
        xdr::LedgerKey::ContractCode(k) => model::LedgerKey::ContractCode {
            hash: Hash256::from(&k.hash),
        },
        xdr::LedgerKey::ConfigSetting(k) => model::LedgerKey::ConfigSetting {
            config_setting_id: convert_config_setting_id(k.config_setting_id),
        },
        xdr::LedgerKey::Ttl(k) => model::LedgerKey::Ttl {
            key_hash: Hash256::from(&k.key_hash),
        },
    }
}
