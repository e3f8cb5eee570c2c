//! Table and column names of the star schema.
//!
//! Generators write rows under these names and downstream generators read
//! their inputs through them, so a rename happens in exactly one place.

// ── Table names ─────────────────────────────────────────────────────────────
pub mod tables {
    pub const TIEMPO: &str = "DimTiempo";
    pub const GEOGRAFIA: &str = "DimGeografia";
    pub const PLANTA: &str = "DimPlanta";
    pub const ALMACEN: &str = "DimAlmacen";
    pub const DEPARTAMENTO: &str = "DimDepartamento";
    pub const PUESTO: &str = "DimPuesto";
    pub const CANAL: &str = "DimCanalDistribucion";
    pub const CLUSTER: &str = "DimCluster";
    pub const PROMOCION: &str = "DimPromocion";
    pub const CEDIS: &str = "DimCEDIS";
    pub const PRODUCTO: &str = "DimProducto";
    pub const EMPLEADO: &str = "DimEmpleado";
    pub const VENDEDOR: &str = "DimVendedor";
    pub const VEHICULO: &str = "DimVehiculo";
    pub const RUTA: &str = "DimRuta";
    pub const CLIENTE: &str = "DimCliente";
}

// ── Calendar ────────────────────────────────────────────────────────────────
pub mod tiempo {
    pub const ID: &str = "ID_Tiempo";
    pub const FECHA: &str = "Fecha";
    pub const ANIO: &str = "Anio";
    pub const MES: &str = "Mes";
    pub const DIA: &str = "Dia";
    pub const DIA_SEMANA: &str = "DiaSemana";
    pub const NOMBRE_DIA_SEMANA: &str = "Nombre_DiaSemana";
    pub const DIA_ANIO: &str = "DiaAnio";
    pub const SEMANA_ISO: &str = "SemanaAnioISO";
    pub const DIA_SEMANA_ISO: &str = "DiaSemanaISO";
    pub const TRIMESTRE: &str = "Trimestre";
    pub const ANIO_FISCAL: &str = "AnioFiscal";
    pub const MES_FISCAL: &str = "MesFiscal";
    pub const TRIMESTRE_FISCAL: &str = "TrimestreFiscal";
    pub const ES_FIN_SEMANA: &str = "EsFinSemana";
    pub const ES_FERIADO: &str = "EsFeriado";
    pub const NOMBRE_FERIADO: &str = "Nombre_Feriado";
    pub const ES_QUINCENA: &str = "EsQuincena";
    pub const FACTOR_GENERAL: &str = "Factor_Estacionalidad_General";
    pub const FACTOR_MENSUAL: &str = "Factor_Estacionalidad_Mensual";
    pub const FACTOR_FERIADO: &str = "Factor_Impacto_Feriado";
}

// ── Geography ───────────────────────────────────────────────────────────────
pub mod geografia {
    pub const ID: &str = "ID_Provincia";
    pub const NOMBRE: &str = "Nombre_Provincia";
    pub const REGION: &str = "Region";
    pub const POBLACION: &str = "Poblacion_Estimada";
    pub const DENSIDAD: &str = "Densidad_Poblacional";
    pub const LATITUD: &str = "Latitud";
    pub const LONGITUD: &str = "Longitud";
    pub const PESO: &str = "Peso_Normalizado";
    pub const NIVEL_SOCIOECONOMICO: &str = "Nivel_Socioeconomico";
    pub const ACTIVO: &str = "Activo";
}

// ── Plant and warehouse ─────────────────────────────────────────────────────
pub mod planta {
    pub const ID: &str = "ID_Planta";
    pub const NOMBRE: &str = "Nombre_Planta";
    pub const TIPO: &str = "Tipo_Planta";
    pub const MUNICIPIO: &str = "Ubicacion_Municipio";
    pub const PROVINCIA: &str = "Provincia";
    pub const LATITUD: &str = "Latitud";
    pub const LONGITUD: &str = "Longitud";
    pub const CAPACIDAD: &str = "Capacidad_Produccion_LtsDia";
    pub const FECHA_INICIO: &str = "Fecha_Inicio_Operaciones";
    pub const ESTADO: &str = "Estado_Operativo";
    pub const CERTIFICACIONES: &str = "Certificaciones";
}

pub mod almacen {
    pub const ID: &str = "ID_Almacen";
    pub const PLANTA_ID: &str = "ID_Planta";
    pub const NOMBRE: &str = "Nombre_Almacen";
    pub const TIPO: &str = "Tipo_Almacen";
    pub const CAPACIDAD_M3: &str = "Capacidad_M3";
    pub const CAPACIDAD_PALLETS: &str = "Capacidad_Pallets";
    pub const REFRIGERACION: &str = "Tiene_Refrigeracion";
    pub const LATITUD: &str = "Latitud";
    pub const LONGITUD: &str = "Longitud";
    pub const ESTADO: &str = "Estado_Operativo";
}

// ── Organization ────────────────────────────────────────────────────────────
pub mod departamento {
    pub const ID: &str = "Departamento_ID";
    pub const NOMBRE: &str = "Nombre_Departamento";
    pub const TIPO: &str = "Tipo_Departamento";
    pub const NIVEL: &str = "Nivel_Organizacional";
    pub const PRESUPUESTO: &str = "Presupuesto_Anual_Estimado_DOP";
    pub const EMPLEADOS: &str = "Numero_Empleados_Estimado";
    pub const OBJETIVO: &str = "Objetivo_Principal";
}

pub mod puesto {
    pub const ID: &str = "Puesto_ID";
    pub const DEPARTAMENTO_ID: &str = "Departamento_ID";
    pub const NOMBRE: &str = "Nombre_Puesto";
    pub const CLAVE: &str = "Clave_Puesto";
    pub const NIVEL: &str = "Nivel_Puesto";
    pub const SALARIO_MIN: &str = "Salario_Base_Mensual_Min_DOP";
    pub const SALARIO_MAX: &str = "Salario_Base_Mensual_Max_DOP";
    pub const SALARIO: &str = "Salario_Base_Mensual_DOP";
    pub const ES_COMERCIAL: &str = "Es_Comercial";
}

// ── Commercial catalogs ─────────────────────────────────────────────────────
pub mod canal {
    pub const ID: &str = "ID_Canal";
    pub const NOMBRE: &str = "Nombre_Canal";
    pub const PESO: &str = "Peso_Mercado";
    pub const PESO_NORMALIZADO: &str = "Peso_Mercado_Normalizado";
    pub const SEGMENTOS: &str = "Segmentos_Objetivo";
    pub const TICKET_BAJO: &str = "Es_Ticket_Bajo";
    pub const ESTADO: &str = "Estado";
}

pub mod cluster {
    pub const ID: &str = "Cluster_ID";
    pub const NOMBRE: &str = "Nombre_Cluster";
    pub const DESCRIPCION: &str = "Descripcion";
    pub const PRIORIDAD: &str = "Nivel_Prioridad";
}

pub mod promocion {
    pub const ID: &str = "ID_Promocion";
    pub const NOMBRE: &str = "Nombre_Promocion";
    pub const DESCRIPCION: &str = "Descripcion";
    pub const FACTOR: &str = "Factor_Incremento_Venta";
    pub const PESO_USO: &str = "Peso_Probabilidad_Uso";
    pub const ACTIVA: &str = "Activa";
}

// ── Distribution centers ────────────────────────────────────────────────────
pub mod cedis {
    pub const ID: &str = "CEDI_ID";
    pub const NOMBRE: &str = "Nombre_CEDI";
    pub const TIPO: &str = "Tipo_CEDI";
    pub const REGION: &str = "Region_Operacion";
    pub const PROVINCIA_ID: &str = "ID_Provincia";
    pub const PLANTA_ID: &str = "Planta_ID";
    pub const LATITUD: &str = "Latitud";
    pub const LONGITUD: &str = "Longitud";
    pub const CAPACIDAD_PALLETS: &str = "Capacidad_Pallets";
    pub const ESTADO: &str = "Estado_Operativo";
}

// ── Products ────────────────────────────────────────────────────────────────
pub mod producto {
    pub const ID: &str = "ID_ProductoSKU";
    pub const NOMBRE: &str = "Nombre_Producto";
    pub const MARCA: &str = "Marca";
    pub const SABOR: &str = "Sabor";
    pub const CATEGORIA: &str = "Categoria";
    pub const CATEGORIA_GLOBAL: &str = "Categoria_Global";
    pub const VOLUMEN: &str = "Volumen_Litros";
    pub const ENVASE: &str = "Tipo_Envase";
    pub const UNIDADES_CAJA: &str = "Unidades_Por_Caja";
    pub const PRECIO: &str = "Precio_Lista_DOP";
    pub const COSTO: &str = "Costo_Prod_DOP";
    pub const PESO: &str = "Peso_Venta";
    pub const PESO_NORMALIZADO: &str = "Peso_Venta_Normalizado";
    pub const APLICA_ISC: &str = "Aplica_ISC";
    pub const TASA_ISC: &str = "Tasa_ISC_Pct";
    pub const FACTOR_ESTACIONALIDAD: &str = "Factor_Estacionalidad_Categoria";
    pub const ACTIVO: &str = "Activo";
}

// ── People ──────────────────────────────────────────────────────────────────
pub mod empleado {
    pub const ID: &str = "Empleado_ID";
    pub const NOMBRE: &str = "Nombre_Completo";
    pub const DEPARTAMENTO_ID: &str = "Departamento_ID";
    pub const PUESTO_ID: &str = "Puesto_ID";
    pub const CEDI_ID: &str = "CEDI_ID";
    pub const PROVINCIA_RESIDENCIA: &str = "Provincia_ID_Residencia";
    pub const FECHA_CONTRATACION: &str = "Fecha_Contratacion";
    pub const SALARIO: &str = "Salario_Base_Mensual_DOP";
    pub const ESTATUS: &str = "Estatus_Empleado";
    pub const EMAIL: &str = "Email_Corporativo";
    pub const TELEFONO: &str = "Telefono_Contacto";
    pub const FECHA_NACIMIENTO: &str = "Fecha_Nacimiento";
    pub const GENERO: &str = "Genero";
    pub const EXPERIENCIA: &str = "Experiencia_Anios";
    pub const TIPO_CONTRATO: &str = "Tipo_Contrato";
}

pub mod vendedor {
    pub const ID: &str = "Vendedor_ID";
    pub const EMPLEADO_ID: &str = "Empleado_ID";
    pub const PUESTO_ID: &str = "Puesto_ID";
    pub const NOMBRE: &str = "Nombre_Vendedor";
    pub const CEDI_ID: &str = "CEDI_Base_ID";
    pub const TIPO: &str = "Tipo_Vendedor";
    pub const ENFOQUE_CANAL: &str = "Enfoque_Canal";
    pub const META: &str = "Meta_Venta_Mensual_DOP";
    pub const COMISION: &str = "Porcentaje_Comision_Objetivo";
    pub const TELEFONO_FLOTA: &str = "Telefono_Flota";
    pub const NIVEL_EXPERIENCIA: &str = "Nivel_Experiencia";
    pub const FECHA_ASIGNACION: &str = "Fecha_Asignacion_Ruta";
    pub const ESTADO: &str = "Estado_Vendedor";
    pub const GERENTE_ID: &str = "Gerente_Directo_ID";
    pub const VISITAS_DIA: &str = "Promedio_Clientes_Visitados_Dia";
    pub const ES_SUPERVISOR: &str = "Es_Supervisor_Gerente";
}

// ── Fleet and routes ────────────────────────────────────────────────────────
pub mod vehiculo {
    pub const ID: &str = "ID_Vehiculo";
    pub const CEDI_ID: &str = "CEDI_Asignado_ID";
    pub const PLACA: &str = "Placa";
    pub const MODELO: &str = "Marca_Modelo";
    pub const TIPO: &str = "Tipo_Vehiculo";
    pub const CAPACIDAD_TON: &str = "Capacidad_Carga_Ton";
    pub const CAPACIDAD_M3: &str = "Capacidad_Volumen_M3";
    pub const RENDIMIENTO: &str = "Rendimiento_Promedio_KmL";
    pub const COSTO_DIARIO: &str = "Costo_Fijo_Operativo_Diario_DOP";
    pub const USO: &str = "Uso_Principal";
    pub const ANIO: &str = "Anio_Fabricacion";
    pub const KILOMETRAJE: &str = "Kilometraje_Actual_KM";
    pub const ESTADO: &str = "Estado_Vehiculo";
    pub const GPS: &str = "Tiene_GPS";
    pub const VALOR: &str = "Valor_Adquisicion_DOP";
    pub const DEPRECIACION: &str = "Depreciacion_Anual_Pct";
}

pub mod ruta {
    pub const ID: &str = "ID_Ruta";
    pub const NOMBRE: &str = "Nombre_Ruta";
    pub const CEDI_ID: &str = "ID_CEDI_Origen";
    pub const CEDI_NOMBRE: &str = "Nombre_CEDI_Origen";
    pub const PROVINCIA_ID: &str = "ID_Provincia_Destino";
    pub const PROVINCIA_NOMBRE: &str = "Nombre_Provincia_Destino";
    pub const ZONA: &str = "Zona_Especifica";
    pub const VEHICULO_ID: &str = "ID_Vehiculo_Asignado";
    pub const VEHICULO_MODELO: &str = "Marca_Modelo_Vehiculo";
    pub const VENDEDOR_ID: &str = "ID_Vendedor_Titular";
    pub const VENDEDOR_NOMBRE: &str = "Nombre_Vendedor_Titular";
    pub const VENDEDOR_TIPO: &str = "Tipo_Vendedor_Ruta";
    pub const DISTANCIA: &str = "Distancia_Ruta_KM";
    pub const TIEMPO: &str = "Tiempo_Ruta_Estimado_Hrs";
    pub const PEAJE: &str = "Costo_Peaje_Estimado_DOP";
    pub const FRECUENCIA: &str = "Frecuencia_Visita";
    pub const DIAS: &str = "Dias_Operacion_Semana";
    pub const TIPO_GEOGRAFICO: &str = "Tipo_Ruta_Geografica";
    pub const ESTADO: &str = "Estado_Ruta";
}

// ── Customers ───────────────────────────────────────────────────────────────
pub mod cliente {
    pub const ID: &str = "ID_Cliente";
    pub const NOMBRE: &str = "Nombre_Cliente";
    pub const PROVINCIA_ID: &str = "ID_Provincia";
    pub const CANAL_ID: &str = "ID_Canal";
    pub const SEGMENTO: &str = "Segmento_Cliente";
    pub const CLUSTER_ID: &str = "Cluster_ID";
    pub const FECHA_ALTA: &str = "Fecha_Alta";
    pub const ACTIVO: &str = "Activo";
    pub const LATITUD: &str = "Latitud";
    pub const LONGITUD: &str = "Longitud";
    pub const ANIO_CREACION: &str = "Ano_Creacion";
}

// ── Status labels ───────────────────────────────────────────────────────────
pub mod status {
    pub const ACTIVO: &str = "Activo";
    pub const OPERATIVO: &str = "Operativo";
    pub const EN_TALLER: &str = "En Taller";
    pub const BAJA: &str = "Baja";
    pub const RUTA_ACTIVA: &str = "Activa";
}
