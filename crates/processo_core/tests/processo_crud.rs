use chrono::NaiveDate;
use processo_core::{
    open_db, open_db_in_memory, Database, DbError, Processo, ProcessoForm, ProcessoRepository,
    ProcessoService, RepoError, ServiceError, SqliteProcessoRepository,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn memory_repo() -> SqliteProcessoRepository {
    SqliteProcessoRepository::new(Database::new(open_db_in_memory().unwrap()))
}

fn form(numero: &str, descricao: &str) -> ProcessoForm {
    ProcessoForm {
        numero: numero.to_string(),
        descricao: descricao.to_string(),
        data_inicio: date(2024, 1, 1),
        data_fim: date(2024, 6, 1),
    }
}

#[test]
fn insert_assigns_id_and_find_by_numero_roundtrips() {
    let repo = memory_repo();

    let mut processo = Processo::new("123-45.2024", "Case A", date(2024, 1, 1), date(2024, 6, 1));
    repo.insert(&mut processo).unwrap();
    let id = processo.id.expect("insert should assign an id");

    let loaded = repo.find_by_numero("123-45.2024").unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.descricao, "Case A");
    assert_eq!(loaded.data_inicio, date(2024, 1, 1));
    assert_eq!(loaded.data_fim, date(2024, 6, 1));
    assert_eq!(loaded.data_insercao, processo.data_insercao);
}

#[test]
fn duplicate_numero_is_rejected_without_second_row() {
    let repo = memory_repo();

    let mut first = Processo::new("dup-1", "first", date(2024, 1, 1), date(2024, 2, 1));
    repo.insert(&mut first).unwrap();

    let mut second = Processo::new("dup-1", "second", date(2024, 3, 1), date(2024, 4, 1));
    let err = repo.insert(&mut second).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateNumero(ref numero) if numero == "dup-1"));
    assert_eq!(second.id, None);

    let all = repo.find_all().unwrap();
    assert_eq!(all.iter().filter(|p| p.numero == "dup-1").count(), 1);
    assert_eq!(all[0].descricao, "first");
}

#[test]
fn find_all_is_empty_for_fresh_store_and_ordered_by_insertion() {
    let repo = memory_repo();
    assert!(repo.find_all().unwrap().is_empty());

    for numero in ["c", "a", "b"] {
        let mut processo = Processo::new(numero, "desc", date(2024, 1, 1), date(2024, 1, 2));
        repo.insert(&mut processo).unwrap();
    }

    let numeros: Vec<_> = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|p| p.numero)
        .collect();
    assert_eq!(numeros, vec!["c", "a", "b"]);
}

#[test]
fn find_by_numero_returns_none_when_absent() {
    let repo = memory_repo();
    assert!(repo.find_by_numero("missing").unwrap().is_none());
}

#[test]
fn delete_by_numero_reports_row_count() {
    let repo = memory_repo();
    let mut processo = Processo::new("del-1", "desc", date(2024, 1, 1), date(2024, 1, 2));
    repo.insert(&mut processo).unwrap();

    assert_eq!(repo.delete_by_numero("del-1").unwrap(), 1);
    assert_eq!(repo.delete_by_numero("del-1").unwrap(), 0);
    assert!(repo.find_by_numero("del-1").unwrap().is_none());
}

#[test]
fn update_changes_only_mutable_fields() {
    let repo = memory_repo();
    let mut processo = Processo::new("upd-1", "before", date(2024, 1, 1), date(2024, 1, 2));
    repo.insert(&mut processo).unwrap();

    let mut loaded = repo.find_by_numero("upd-1").unwrap().unwrap();
    loaded.descricao = "after".to_string();
    loaded.data_inicio = date(2025, 3, 1);
    loaded.data_fim = date(2025, 9, 1);
    repo.update(&loaded).unwrap();

    let reloaded = repo.find_by_numero("upd-1").unwrap().unwrap();
    assert_eq!(reloaded.id, processo.id);
    assert_eq!(reloaded.numero, "upd-1");
    assert_eq!(reloaded.descricao, "after");
    assert_eq!(reloaded.data_inicio, date(2025, 3, 1));
    assert_eq!(reloaded.data_fim, date(2025, 9, 1));
    assert_eq!(reloaded.data_insercao, processo.data_insercao);
}

#[test]
fn update_of_vanished_row_returns_not_found() {
    let repo = memory_repo();
    let mut processo = Processo::new("gone", "desc", date(2024, 1, 1), date(2024, 1, 2));
    repo.insert(&mut processo).unwrap();
    repo.delete_by_numero("gone").unwrap();

    let err = repo.update(&processo).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref numero) if numero == "gone"));
}

#[test]
fn validation_failure_blocks_insert_before_storage() {
    let repo = memory_repo();
    let mut blank = Processo::new("  ", "desc", date(2024, 1, 1), date(2024, 1, 2));

    let err = repo.insert(&mut blank).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn corrupt_persisted_date_is_reported_as_invalid_data() {
    let db = Database::new(open_db_in_memory().unwrap());
    db.with_transaction(|tx| -> Result<(), DbError> {
        tx.execute(
            "INSERT INTO processo (numero, descricao, data_inicio, data_fim, data_insercao)
             VALUES ('bad', 'desc', 'not-a-date', '2024-01-02', '2024-01-01 00:00:00');",
            [],
        )?;
        Ok(())
    })
    .unwrap();

    let repo = SqliteProcessoRepository::new(db);
    let err = repo.find_by_numero("bad").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.sqlite3");

    {
        let repo = SqliteProcessoRepository::new(Database::new(open_db(&path).unwrap()));
        let mut processo = Processo::new("persist", "desc", date(2024, 1, 1), date(2024, 1, 2));
        repo.insert(&mut processo).unwrap();
    }

    let repo = SqliteProcessoRepository::new(Database::new(open_db(&path).unwrap()));
    assert!(repo.find_by_numero("persist").unwrap().is_some());
}

#[test]
fn service_runs_full_lifecycle() {
    let service = ProcessoService::new(memory_repo());

    let created = service.create(form("123-45.2024", "Case A")).unwrap();
    assert!(created.id.is_some());

    let fetched = service.get("123-45.2024").unwrap();
    assert_eq!(fetched.descricao, "Case A");

    let updated = service
        .update(ProcessoForm {
            data_fim: date(2024, 12, 31),
            ..form("123-45.2024", "Case A updated")
        })
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.descricao, "Case A updated");
    assert_eq!(updated.data_fim, date(2024, 12, 31));
    assert_eq!(updated.data_insercao, created.data_insercao);

    service.delete("123-45.2024").unwrap();
    assert!(matches!(
        service.get("123-45.2024").unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[test]
fn service_maps_duplicate_and_missing_records() {
    let service = ProcessoService::new(memory_repo());
    service.create(form("1", "a")).unwrap();

    assert!(matches!(
        service.create(form("1", "b")).unwrap_err(),
        ServiceError::DuplicateNumero(_)
    ));
    assert!(matches!(
        service.delete("nope").unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        service.update(form("nope", "x")).unwrap_err(),
        ServiceError::NotFound(_)
    ));

    let all = service.list().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].descricao, "a");
}
