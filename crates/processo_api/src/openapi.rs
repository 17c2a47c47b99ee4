//! Static OpenAPI 3 description of the processo routes.

use serde_json::{json, Value};

pub fn openapi_document() -> Value {
    let error = json!({ "$ref": "#/components/schemas/ErrorSchema" });
    let numero_query = json!([{
        "name": "numero",
        "in": "query",
        "required": true,
        "schema": { "type": "string", "maxLength": 50 }
    }]);
    let form_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ProcessoSchema" }
            },
            "application/x-www-form-urlencoded": {
                "schema": { "$ref": "#/components/schemas/ProcessoSchema" }
            }
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Processo API",
            "version": processo_core::core_version()
        },
        "tags": [
            {
                "name": "Documentação",
                "description": "Descrição da API em formato OpenAPI"
            },
            {
                "name": "Processo",
                "description": "Cadastro de número de processo"
            }
        ],
        "paths": {
            "/processo": {
                "post": {
                    "tags": ["Processo"],
                    "summary": "Adiciona um novo número de processo com datas obrigatórias",
                    "requestBody": form_body,
                    "responses": {
                        "200": response("#/components/schemas/ListagemDeProcessosSchema"),
                        "400": error_response(&error),
                        "409": error_response(&error)
                    }
                }
            },
            "/processos": {
                "get": {
                    "tags": ["Processo"],
                    "summary": "Lista todos os processos cadastrados",
                    "responses": {
                        "200": response("#/components/schemas/ListagemDeProcessosSchema")
                    }
                }
            },
            "/busca_processo": {
                "get": {
                    "tags": ["Processo"],
                    "summary": "Busca um processo pelo número",
                    "parameters": numero_query,
                    "responses": {
                        "200": response("#/components/schemas/ProcessoViewSchema"),
                        "404": error_response(&error)
                    }
                }
            },
            "/del_processo": {
                "delete": {
                    "tags": ["Processo"],
                    "summary": "Remove um processo pelo número",
                    "parameters": numero_query,
                    "responses": {
                        "200": response("#/components/schemas/ProcessoDelSchema"),
                        "404": error_response(&error)
                    }
                }
            },
            "/processo/atualizar": {
                "put": {
                    "tags": ["Processo"],
                    "summary": "Atualiza descrição e datas de um processo existente",
                    "requestBody": form_body,
                    "responses": {
                        "200": response("#/components/schemas/ProcessoViewSchema"),
                        "400": error_response(&error),
                        "404": error_response(&error)
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ProcessoSchema": {
                    "type": "object",
                    "required": ["numero", "descricao", "data_inicio", "data_fim"],
                    "properties": processo_properties()
                },
                "ProcessoViewSchema": {
                    "type": "object",
                    "properties": processo_properties()
                },
                "ListagemDeProcessosSchema": {
                    "type": "object",
                    "properties": {
                        "processos": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/ProcessoViewSchema" }
                        }
                    }
                },
                "ProcessoDelSchema": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "numero": { "type": "string" }
                    }
                },
                "ErrorSchema": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    }
                }
            }
        }
    })
}

fn processo_properties() -> Value {
    json!({
        "numero": { "type": "string", "maxLength": 50 },
        "descricao": { "type": "string", "maxLength": 255 },
        "data_inicio": { "type": "string", "format": "date" },
        "data_fim": { "type": "string", "format": "date" }
    })
}

fn response(schema_ref: &str) -> Value {
    json!({
        "description": "Sucesso",
        "content": {
            "application/json": { "schema": { "$ref": schema_ref } }
        }
    })
}

fn error_response(error: &Value) -> Value {
    json!({
        "description": "Erro",
        "content": {
            "application/json": { "schema": error }
        }
    })
}
