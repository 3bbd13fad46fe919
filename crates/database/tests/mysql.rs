//! Store tests against a live MySQL server.
//!
//! Ignored by default. Point the `DB_*` variables at a scratch database and run
//! `cargo test -p database -- --ignored`. The bundled script is loaded first,
//! so the `imoveis` table exists and holds the seed rows.

use configuration::load_config;
use core_types::NewImovel;
use database::{load_schema, ConnectionProvider, DbRepository, ImovelStore};
use rust_decimal_macros::dec;
use std::path::Path;

async fn repository() -> DbRepository {
    let settings = load_config(None).expect("database settings");
    let provider = ConnectionProvider::new(&settings.database);
    let script = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scripts/imoveis.sql");
    load_schema(&provider, &script).await.expect("bundled schema loads");
    DbRepository::new(provider)
}

fn apartamento_em_vitoria() -> NewImovel {
    NewImovel {
        logradouro: "Constante Sodré".to_string(),
        tipo_logradouro: "Rua".to_string(),
        bairro: "Praia do Canto".to_string(),
        cidade: "Vitória".to_string(),
        cep: "29055-420".to_string(),
        tipo: "apartamento".to_string(),
        valor: dec!(1000000.55),
        data_aquisicao: "03 de outubro de 2024".to_string(),
    }
}

#[tokio::test]
#[ignore = "needs a MySQL server configured through DB_* variables"]
async fn inserted_row_reads_back_in_column_order() {
    let repo = repository().await;
    let new = apartamento_em_vitoria();

    let id = repo.insert_imovel(&new).await.unwrap();
    assert!(id > 0);

    let imovel = repo.get_imovel(id).await.unwrap().expect("row just inserted");
    assert_eq!(imovel.id, id);
    assert_eq!(imovel.logradouro, new.logradouro);
    assert_eq!(imovel.tipo_logradouro, new.tipo_logradouro);
    assert_eq!(imovel.bairro, new.bairro);
    assert_eq!(imovel.cidade, new.cidade);
    assert_eq!(imovel.cep, new.cep);
    assert_eq!(imovel.tipo, new.tipo);
    assert!((imovel.valor - 1_000_000.55).abs() < 1e-6, "valor = {}", imovel.valor);
    assert_eq!(imovel.data_aquisicao, "03 de outubro de 2024");

    repo.delete_imovel(id).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a MySQL server configured through DB_* variables"]
async fn consecutive_inserts_get_distinct_ids() {
    let repo = repository().await;
    let first = repo.insert_imovel(&apartamento_em_vitoria()).await.unwrap();
    let second = repo.insert_imovel(&apartamento_em_vitoria()).await.unwrap();
    assert!(second > first);

    repo.delete_imovel(first).await.unwrap();
    repo.delete_imovel(second).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a MySQL server configured through DB_* variables"]
async fn update_with_identical_values_still_matches() {
    let repo = repository().await;
    let new = apartamento_em_vitoria();
    let id = repo.insert_imovel(&new).await.unwrap();

    assert!(repo.update_imovel(id, &new).await.unwrap());

    let mut changed = new.clone();
    changed.tipo = "casa".to_string();
    assert!(repo.update_imovel(id, &changed).await.unwrap());
    let imovel = repo.get_imovel(id).await.unwrap().unwrap();
    assert_eq!(imovel.tipo, "casa");

    repo.delete_imovel(id).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a MySQL server configured through DB_* variables"]
async fn update_and_delete_of_missing_id_report_false() {
    let repo = repository().await;
    let id = repo.insert_imovel(&apartamento_em_vitoria()).await.unwrap();

    assert!(repo.delete_imovel(id).await.unwrap());
    assert!(!repo.delete_imovel(id).await.unwrap());
    assert!(!repo.update_imovel(id, &apartamento_em_vitoria()).await.unwrap());
    assert!(repo.get_imovel(id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "needs a MySQL server configured through DB_* variables"]
async fn filters_match_exact_values() {
    let repo = repository().await;
    let id = repo.insert_imovel(&apartamento_em_vitoria()).await.unwrap();

    let by_cidade = repo.find_by_cidade("Vitória").await.unwrap();
    assert!(by_cidade.iter().any(|imovel| imovel.id == id));
    assert!(by_cidade.iter().all(|imovel| imovel.cidade == "Vitória"));

    let by_tipo = repo.find_by_tipo("apartamento").await.unwrap();
    assert!(by_tipo.iter().any(|imovel| imovel.id == id));
    assert!(by_tipo.iter().all(|imovel| imovel.tipo == "apartamento"));

    assert!(repo.find_by_cidade("Cidade Inexistente").await.unwrap().is_empty());

    let all = repo.list_imoveis().await.unwrap();
    assert!(all.iter().any(|imovel| imovel.id == id));

    repo.delete_imovel(id).await.unwrap();
}
