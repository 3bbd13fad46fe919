use crate::error::CoreError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Digits kept after the decimal point by the `valor` column.
const VALOR_SCALE: u32 = 2;

/// Exclusive upper bound on `|valor|`: 13 integer digits, as in DECIMAL(15,2).
const VALOR_LIMIT: i64 = 10_000_000_000_000;

/// A raw row from the `imoveis` table, in column order:
/// `id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao`.
pub type ImovelRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    Decimal,
    String,
);

/// A property record as it is rendered to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imovel {
    pub id: i64,
    pub logradouro: String,
    pub tipo_logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub cep: String,
    pub tipo: String,
    pub valor: f64,
    pub data_aquisicao: String,
}

/// Converts a positional store row into a named `Imovel`.
///
/// `cep` and `data_aquisicao` are always text and `valor` is rendered as a
/// floating point number, whichever fetch path produced the row.
pub fn format_imovel(row: ImovelRow) -> Imovel {
    let (id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao) = row;
    Imovel {
        id,
        logradouro,
        tipo_logradouro,
        bairro,
        cidade,
        cep,
        tipo,
        valor: valor.to_f64().unwrap_or_default(),
        data_aquisicao,
    }
}

/// The JSON body accepted by `POST /imoveis` and `PUT /imoveis/{id}`.
///
/// Every field is optional at this stage so that a missing field is reported
/// as a validation failure instead of a body parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImovelPayload {
    pub logradouro: Option<String>,
    pub tipo_logradouro: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub cep: Option<String>,
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub valor: Option<Decimal>,
    pub data_aquisicao: Option<String>,
}

/// A fully validated set of writable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImovel {
    pub logradouro: String,
    pub tipo_logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub cep: String,
    pub tipo: String,
    pub valor: Decimal,
    pub data_aquisicao: String,
}

impl ImovelPayload {
    /// Checks that every writable field is present and non-blank, and that
    /// `valor` can be stored without rounding.
    ///
    /// Values are kept exactly as submitted; blank strings only count as missing.
    pub fn validate(self) -> Result<NewImovel, CoreError> {
        let fields = (
            present(self.logradouro),
            present(self.tipo_logradouro),
            present(self.bairro),
            present(self.cidade),
            present(self.cep),
            present(self.tipo),
            self.valor,
            present(self.data_aquisicao),
        );

        match fields {
            (
                Some(logradouro),
                Some(tipo_logradouro),
                Some(bairro),
                Some(cidade),
                Some(cep),
                Some(tipo),
                Some(valor),
                Some(data_aquisicao),
            ) => Ok(NewImovel {
                valor: storable(valor)?,
                logradouro,
                tipo_logradouro,
                bairro,
                cidade,
                cep,
                tipo,
                data_aquisicao,
            }),
            (a, b, c, d, e, f, g, h) => {
                let missing = [
                    ("logradouro", a.is_none()),
                    ("tipo_logradouro", b.is_none()),
                    ("bairro", c.is_none()),
                    ("cidade", d.is_none()),
                    ("cep", e.is_none()),
                    ("tipo", f.is_none()),
                    ("valor", g.is_none()),
                    ("data_aquisicao", h.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(CoreError::MissingFields(missing))
            }
        }
    }
}

impl NewImovel {
    /// Builds the row the store would hold for this record under `id`.
    pub fn into_row(self, id: i64) -> ImovelRow {
        (
            id,
            self.logradouro,
            self.tipo_logradouro,
            self.bairro,
            self.cidade,
            self.cep,
            self.tipo,
            self.valor,
            self.data_aquisicao,
        )
    }
}

/// Trailing zeros are fine ("10.500"); a third significant decimal is not.
fn storable(valor: Decimal) -> Result<Decimal, CoreError> {
    let normalized = valor.normalize();
    if normalized.scale() > VALOR_SCALE || normalized.abs() >= Decimal::from(VALOR_LIMIT) {
        return Err(CoreError::ValorOutOfRange(valor));
    }
    Ok(valor)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValor {
    Text(String),
    Number(Decimal),
}

/// Accepts `valor` as a JSON number or a numeric string. Blank strings count as absent.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawValor>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawValor::Number(value)) => Ok(Some(value)),
        Some(RawValor::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawValor::Text(text)) => Decimal::from_str(text.trim())
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid valor '{text}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample_row() -> ImovelRow {
        (
            1,
            "Consolação".to_string(),
            "Rua".to_string(),
            "Jardins".to_string(),
            "São Paulo".to_string(),
            "01000-000".to_string(),
            "apartamento".to_string(),
            dec!(1000000.00),
            "2024/10/03".to_string(),
        )
    }

    fn full_body() -> serde_json::Value {
        json!({
            "logradouro": "Consolação",
            "tipo_logradouro": "Rua",
            "bairro": "Jardins",
            "cidade": "São Paulo",
            "cep": "01000-000",
            "tipo": "apartamento",
            "valor": "1000000",
            "data_aquisicao": "2024/10/03"
        })
    }

    #[test]
    fn format_names_every_position() {
        let imovel = format_imovel(sample_row());
        assert_eq!(imovel.id, 1);
        assert_eq!(imovel.logradouro, "Consolação");
        assert_eq!(imovel.tipo_logradouro, "Rua");
        assert_eq!(imovel.bairro, "Jardins");
        assert_eq!(imovel.cidade, "São Paulo");
        assert_eq!(imovel.cep, "01000-000");
        assert_eq!(imovel.tipo, "apartamento");
        assert_eq!(imovel.valor, 1_000_000.0);
        assert_eq!(imovel.data_aquisicao, "2024/10/03");
    }

    #[test]
    fn format_renders_valor_as_json_number() {
        let mut row = sample_row();
        row.7 = dec!(350000.50);
        let value = serde_json::to_value(format_imovel(row)).unwrap();
        assert_eq!(value["valor"], json!(350000.5));
    }

    #[test]
    fn payload_accepts_string_and_numeric_valor() {
        let from_string: ImovelPayload = serde_json::from_value(full_body()).unwrap();
        assert_eq!(from_string.valor, Some(dec!(1000000)));

        let mut body = full_body();
        body["valor"] = json!(1250.75);
        let from_number: ImovelPayload = serde_json::from_value(body).unwrap();
        assert_eq!(from_number.valor, Some(dec!(1250.75)));
    }

    #[test]
    fn payload_rejects_non_numeric_valor() {
        let mut body = full_body();
        body["valor"] = json!("caro");
        assert!(serde_json::from_value::<ImovelPayload>(body).is_err());
    }

    #[test]
    fn payload_ignores_unknown_keys() {
        let mut body = full_body();
        body["_links"] = json!({ "self": { "href": "http://localhost:5000/imoveis/1", "method": "GET" } });
        let payload: ImovelPayload = serde_json::from_value(body).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn validate_keeps_values_as_submitted() {
        let payload: ImovelPayload = serde_json::from_value(full_body()).unwrap();
        let new = payload.validate().unwrap();
        assert_eq!(new.logradouro, "Consolação");
        assert_eq!(new.cep, "01000-000");
        assert_eq!(new.valor, dec!(1000000));
        assert_eq!(new.data_aquisicao, "2024/10/03");
    }

    #[test]
    fn validate_reports_missing_and_blank_fields() {
        let mut body = full_body();
        body.as_object_mut().unwrap().remove("cidade");
        body["bairro"] = json!("   ");
        body["valor"] = json!("");
        let payload: ImovelPayload = serde_json::from_value(body).unwrap();

        assert_eq!(
            payload.validate(),
            Err(CoreError::MissingFields(vec!["bairro", "cidade", "valor"]))
        );
    }

    #[test]
    fn validate_treats_null_as_missing() {
        let mut body = full_body();
        body["tipo"] = serde_json::Value::Null;
        let payload: ImovelPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.validate(), Err(CoreError::MissingFields(vec!["tipo"])));
    }

    #[test]
    fn validate_accepts_cents_and_trailing_zeros() {
        for valor in [json!("1000.55"), json!("1000.500"), json!("9999999999999.99"), json!(1250.75)] {
            let mut body = full_body();
            body["valor"] = valor.clone();
            let payload: ImovelPayload = serde_json::from_value(body).unwrap();
            assert!(payload.validate().is_ok(), "rejected {valor}");
        }
    }

    #[test]
    fn validate_rejects_valor_that_would_be_rounded() {
        let mut body = full_body();
        body["valor"] = json!("1000.555");
        let payload: ImovelPayload = serde_json::from_value(body).unwrap();
        assert_eq!(
            payload.validate(),
            Err(CoreError::ValorOutOfRange(dec!(1000.555)))
        );
    }

    #[test]
    fn validate_rejects_valor_beyond_thirteen_digits() {
        for valor in ["10000000000000", "-10000000000000.00"] {
            let mut body = full_body();
            body["valor"] = json!(valor);
            let payload: ImovelPayload = serde_json::from_value(body).unwrap();
            assert!(matches!(payload.validate(), Err(CoreError::ValorOutOfRange(_))));
        }
    }

    #[test]
    fn into_row_round_trips_through_formatter() {
        let payload: ImovelPayload = serde_json::from_value(full_body()).unwrap();
        let imovel = format_imovel(payload.validate().unwrap().into_row(42));
        assert_eq!(imovel.id, 42);
        assert_eq!(imovel.cidade, "São Paulo");
        assert_eq!(imovel.valor, 1_000_000.0);
    }
}
